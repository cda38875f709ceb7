//! Router ownership per world
//!
//! Each simulated world gets at most one [`HitTestRouter`]. It is created
//! when the first surface of that world registers and dropped when the last
//! one unregisters, so worlds never share hit caches or forced hits.

use std::collections::HashMap;
use std::rc::Rc;

use crate::surface::SurfaceController;
use crate::world::{GameWorld, WorldId};
use super::router::HitTestRouter;

/// Owner of the per-world hit-test routers of one viewport host
#[derive(Default)]
pub struct RouterRegistry {
    routers: HashMap<WorldId, Rc<HitTestRouter>>,
    headless: bool,
}

impl RouterRegistry {
    /// Registry for an interactive (rendering) application
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for a headless application (dedicated server, null renderer)
    ///
    /// Surfaces never activate against a headless registry.
    pub fn headless() -> Self {
        Self {
            routers: HashMap::new(),
            headless: true,
        }
    }

    /// Whether this registry serves a headless application
    pub fn is_headless(&self) -> bool {
        self.headless
    }

    /// Router of a world, if any live surface of it is registered
    ///
    /// A router whose surfaces were all dropped without deactivating is
    /// treated as gone even before [`prune`](Self::prune) removes it.
    pub fn router_for(&self, world: WorldId) -> Option<Rc<HitTestRouter>> {
        self.routers
            .get(&world)
            .filter(|router| !router.is_empty())
            .cloned()
    }

    /// Number of worlds with a live router
    pub fn len(&self) -> usize {
        self.routers.values().filter(|router| !router.is_empty()).count()
    }

    /// Whether no live router exists
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop routers left without live surfaces
    ///
    /// Controllers dropped without [`SurfaceController::deactivate`] leave
    /// their router empty. Hosts may call this once per frame; attach and
    /// detach call it too.
    pub fn prune(&mut self) {
        self.routers.retain(|world, router| {
            let keep = !router.is_empty();
            if !keep {
                log::info!("RouterRegistry: no live surfaces left in {:?}, dropping its router", world);
            }
            keep
        });
    }

    /// Register `controller` with the router of `world`, creating it on first use
    pub(crate) fn attach(&mut self, world: &Rc<dyn GameWorld>, controller: &Rc<SurfaceController>) -> Rc<HitTestRouter> {
        self.prune();
        let router = self
            .routers
            .entry(world.id())
            .or_insert_with(|| {
                log::info!("RouterRegistry: creating hit-test router for {:?}", world.id());
                Rc::new(HitTestRouter::new(world))
            })
            .clone();

        router.register(controller);
        router
    }

    /// Unregister `controller` from the router of `world`, dropping the router once empty
    pub(crate) fn detach(&mut self, world: WorldId, controller: &Rc<SurfaceController>) {
        let Some(router) = self.routers.get(&world) else {
            return;
        };

        router.unregister(controller);
        if router.is_empty() {
            log::info!("RouterRegistry: last surface left {:?}, dropping its router", world);
            self.routers.remove(&world);
        }
        self.prune();
    }
}
