//! Per-world hit-test router
//!
//! Routes the host viewport's hit-testing for every VR widget surface in
//! one world. Resolution goes through a [`HitCache`] so repeated queries in
//! a frame trace once, and a forced hit (supplied by a VR controller trace)
//! overrides screen-position resolution entirely.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::foundation::math::Vec2;
use crate::physics::{ComponentId, HitResult};
use crate::surface::{SurfaceController, WidgetSurface};
use crate::ui::{
    same_widget, ArrangedChildren, ArrangedWidget, Geometry, LayoutTransform,
    VirtualPointerPosition, WidgetAndPointer, WidgetRef,
};
use crate::world::{GameWorld, PlayerControllerId, WorldId};
use super::cache::HitCache;
use super::path::CustomHitTestPath;

/// Why a resolved hit was not routed to its surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRejection {
    /// The trace struck the back of the widget
    BackFace,
    /// The trace started farther away than the surface's interaction distance
    OutOfRange,
}

/// Check whether `hit` may interact with `surface`
///
/// The facing test keeps the comparison `dot(facing, impact - start) < 0`.
/// The interaction distance is inclusive.
pub fn check_hit(surface: &dyn WidgetSurface, hit: &HitResult) -> Result<(), HitRejection> {
    if surface.facing_vector().dot(&hit.trace_vector()) >= 0.0 {
        return Err(HitRejection::BackFace);
    }

    let max_distance = surface.max_interaction_distance();
    let distance_squared = (hit.trace_start - surface.world_position()).norm_squared();
    if distance_squared > max_distance * max_distance {
        return Err(HitRejection::OutOfRange);
    }

    Ok(())
}

/// Hit-test router shared by every registered surface of one world
pub struct HitTestRouter {
    world: Weak<dyn GameWorld>,
    world_id: WorldId,
    registered: RefCell<Vec<Weak<SurfaceController>>>,
    cache: HitCache,
}

impl HitTestRouter {
    /// Create a router for `world`
    pub fn new(world: &Rc<dyn GameWorld>) -> Self {
        Self {
            world: Rc::downgrade(world),
            world_id: world.id(),
            registered: RefCell::new(Vec::new()),
            cache: HitCache::new(),
        }
    }

    /// Identity of the world this router serves
    pub fn world_id(&self) -> WorldId {
        self.world_id
    }

    /// Add a surface controller; returns `false` if it was already registered
    pub fn register(&self, controller: &Rc<SurfaceController>) -> bool {
        let mut registered = self.registered.borrow_mut();
        registered.retain(|entry| entry.strong_count() > 0);

        if registered.iter().any(|entry| entry.as_ptr() == Rc::as_ptr(controller)) {
            return false;
        }

        registered.push(Rc::downgrade(controller));
        log::debug!(
            "HitTestRouter {:?}: registered surface {:?} ({} total)",
            self.world_id,
            controller.component_id(),
            registered.len()
        );
        true
    }

    /// Remove a surface controller; returns `false` if it was not registered
    pub fn unregister(&self, controller: &Rc<SurfaceController>) -> bool {
        let mut registered = self.registered.borrow_mut();
        let before = registered.len();
        registered.retain(|entry| entry.as_ptr() != Rc::as_ptr(controller));
        let removed = registered.len() != before;
        registered.retain(|entry| entry.strong_count() > 0);

        if removed {
            log::debug!(
                "HitTestRouter {:?}: unregistered surface {:?} ({} left)",
                self.world_id,
                controller.component_id(),
                registered.len()
            );
        }
        removed
    }

    /// Number of live registered surfaces
    pub fn len(&self) -> usize {
        self.registered
            .borrow()
            .iter()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }

    /// Whether no live surface is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `controller` is registered with this router
    pub fn is_registered(&self, controller: &Rc<SurfaceController>) -> bool {
        self.registered
            .borrow()
            .iter()
            .any(|entry| entry.as_ptr() == Rc::as_ptr(controller))
    }

    /// Override screen-position resolution with `hit` until replaced or cleared
    pub fn set_forced_hit(&self, hit: HitResult) {
        log::trace!("HitTestRouter {:?}: forced hit on {:?}", self.world_id, hit.component);
        self.cache.set_forced(hit);
    }

    /// Return to screen-position resolution
    pub fn clear_forced_hit(&self) {
        self.cache.clear_forced();
    }

    /// Currently forced hit, if any
    pub fn forced_hit(&self) -> Option<HitResult> {
        self.cache.forced()
    }

    /// Component under a screen position, if any
    pub fn resolve_hit_at_position(
        &self,
        controller: PlayerControllerId,
        screen_position: Vec2,
    ) -> Option<ComponentId> {
        let world = self.game_world()?;
        self.resolve_hit(world.as_ref(), controller, screen_position)?
            .component
    }

    fn resolve_hit(
        &self,
        world: &dyn GameWorld,
        controller: PlayerControllerId,
        screen_position: Vec2,
    ) -> Option<HitResult> {
        self.cache.resolve(world.frame_number(), screen_position, || {
            world.trace_screen_position(controller, screen_position)
        })
    }

    /// The world, if it still exists and runs gameplay
    fn game_world(&self) -> Option<Rc<dyn GameWorld>> {
        let world = self.world.upgrade()?;
        if !world.is_game_world() {
            log::trace!("HitTestRouter {:?}: queried outside a game world", self.world_id);
            return None;
        }
        Some(world)
    }

    /// Live registered controllers, in registration order
    fn live_controllers(&self) -> Vec<Rc<SurfaceController>> {
        self.registered
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    fn controller_for_component(&self, component: ComponentId) -> Option<Rc<SurfaceController>> {
        self.live_controllers()
            .into_iter()
            .find(|controller| controller.component_id() == component)
    }
}

impl CustomHitTestPath for HitTestRouter {
    fn bubble_path_and_virtual_cursors(
        &self,
        geometry: &Geometry,
        desktop_coordinate: Vec2,
        ignore_enabled: bool,
    ) -> Vec<WidgetAndPointer> {
        let Some(world) = self.game_world() else {
            return Vec::new();
        };
        let Some(player_controller) = world.primary_player_controller() else {
            return Vec::new();
        };

        let screen_position = geometry.absolute_to_local(desktop_coordinate);
        let Some(hit) = self.resolve_hit(world.as_ref(), player_controller, screen_position) else {
            return Vec::new();
        };
        let Some(controller) = hit.component.and_then(|component| self.controller_for_component(component)) else {
            log::trace!("HitTestRouter {:?}: {:?} is not a registered surface", self.world_id, hit.component);
            return Vec::new();
        };

        let surface = controller.surface();
        if let Err(rejection) = check_hit(surface.as_ref(), &hit) {
            log::trace!(
                "HitTestRouter {:?}: hit on {:?} rejected ({:?})",
                self.world_id,
                hit.component,
                rejection
            );
            return Vec::new();
        }

        surface.hit_widget_path(&hit.location, ignore_enabled, 0.0)
    }

    fn arrange_children(&self, children: &mut ArrangedChildren) {
        for controller in self.live_controllers() {
            let surface = controller.surface();
            if let Some(widget) = surface.widget() {
                let geometry = Geometry::default().make_child(surface.draw_size(), LayoutTransform::identity());
                children.add_widget(ArrangedWidget::new(widget, geometry));
            }
        }
    }

    fn translate_mouse_coordinate_for_3d_child(
        &self,
        child: &WidgetRef,
        viewport_geometry: &Geometry,
        screen_coordinate: Vec2,
        _last_screen_coordinate: Vec2,
    ) -> Option<VirtualPointerPosition> {
        let world = self.game_world()?;
        let player_controller = world.primary_player_controller()?;
        let local_coordinate = viewport_geometry.absolute_to_local(screen_coordinate);

        for controller in self.live_controllers() {
            let surface = controller.surface();
            let renders_child = surface
                .widget()
                .is_some_and(|widget| same_widget(&widget, child));
            if !renders_child {
                continue;
            }

            let Some(hit) = self.resolve_hit(world.as_ref(), player_controller, local_coordinate) else {
                continue;
            };
            if hit.component == Some(surface.component_id()) {
                let local_hit = surface.world_to_local(&hit.location);
                return Some(VirtualPointerPosition::stationary(local_hit));
            }
        }

        None
    }
}
