//! VR interaction for one widget surface
//!
//! Bridges a VR controller's world-space hits to the widget event pipeline:
//! forces the router's hit so host-driven queries agree with the VR ray,
//! keeps the hovered widget set in sync, and synthesizes pointer and key
//! events against the widgets under the hit.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::config::{InteractionConfig, WidgetSpace};
use crate::foundation::math::{Vec2, Vec3};
use crate::hit_test::{CustomHitTestPath, HitTestRouter, RouterRegistry};
use crate::physics::{ComponentId, HitResult};
use crate::ui::{
    Geometry, InputMode, KeyEvent, ModifierKeys, PointerEvent, Reply, UiHost,
    VirtualPointerPosition, WidgetAndPointer, WidgetPath, WidgetRef,
};
use crate::world::{GameWorld, PlayerControllerId, WorldId};
use super::WidgetSurface;

/// Reasons a surface does not get VR interaction
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationError {
    /// Screen-space widgets use the regular 2D cursor path
    #[error("surface is drawn in screen space")]
    ScreenSpace,

    /// Nothing is rendered, so nothing can be hit
    #[error("application is headless")]
    Headless,

    /// Editor and preview worlds do not route VR input
    #[error("world {0:?} is not a game world")]
    NotGameWorld(WorldId),

    /// A surface only registers with the router of its own world
    #[error("surface belongs to {surface:?}, not {requested:?}")]
    WorldMismatch {
        /// World the surface was activated in
        surface: WorldId,
        /// World passed to registration
        requested: WorldId,
    },
}

#[derive(Debug, Clone, Copy)]
enum PointerAction {
    Down,
    Up,
    Move,
}

#[derive(Debug, Clone, Copy)]
enum KeyAction {
    Down,
    Up,
}

/// VR interaction state of one widget surface
pub struct SurfaceController {
    surface: Rc<dyn WidgetSurface>,
    host: Rc<dyn UiHost>,
    interaction: InteractionConfig,
    world: WorldId,
    router: RefCell<Option<Rc<HitTestRouter>>>,
    hovered: RefCell<Vec<WidgetAndPointer>>,
}

impl SurfaceController {
    /// Activate VR interaction for `surface` in `world`
    ///
    /// Registers the new controller with the world's router, creating the
    /// router if this is the world's first surface.
    pub fn activate(
        surface: Rc<dyn WidgetSurface>,
        host: Rc<dyn UiHost>,
        interaction: InteractionConfig,
        world: &Rc<dyn GameWorld>,
        registry: &mut RouterRegistry,
    ) -> Result<Rc<Self>, ActivationError> {
        if surface.config().space == WidgetSpace::Screen {
            return Err(ActivationError::ScreenSpace);
        }
        if registry.is_headless() {
            return Err(ActivationError::Headless);
        }
        if !world.is_game_world() {
            return Err(ActivationError::NotGameWorld(world.id()));
        }

        let controller = Rc::new(Self {
            surface,
            host,
            interaction,
            world: world.id(),
            router: RefCell::new(None),
            hovered: RefCell::new(Vec::new()),
        });
        controller.register(world, registry)?;

        log::debug!(
            "SurfaceController: activated {:?} in {:?}",
            controller.component_id(),
            controller.world
        );
        Ok(controller)
    }

    /// (Re-)register with the world's router
    ///
    /// Registering twice leaves the router unchanged but refreshes the
    /// cached router reference. `world` must be the world the controller
    /// was activated in.
    pub fn register(self: &Rc<Self>, world: &Rc<dyn GameWorld>, registry: &mut RouterRegistry) -> Result<(), ActivationError> {
        if world.id() != self.world {
            log::warn!(
                "SurfaceController {:?}: refusing to register with {:?}, surface lives in {:?}",
                self.component_id(),
                world.id(),
                self.world
            );
            return Err(ActivationError::WorldMismatch {
                surface: self.world,
                requested: world.id(),
            });
        }

        let router = registry.attach(world, self);
        *self.router.borrow_mut() = Some(router);
        Ok(())
    }

    /// Unregister from the world's router and forget hover state
    ///
    /// The router is dropped if this was the last surface of its world.
    pub fn deactivate(self: &Rc<Self>, registry: &mut RouterRegistry) {
        registry.detach(self.world, self);
        self.router.borrow_mut().take();
        self.hovered.borrow_mut().clear();

        log::debug!("SurfaceController: deactivated {:?}", self.component_id());
    }

    /// The rendering-side surface
    pub fn surface(&self) -> &Rc<dyn WidgetSurface> {
        &self.surface
    }

    /// Component identity of the surface
    pub fn component_id(&self) -> ComponentId {
        self.surface.component_id()
    }

    /// World this controller was activated in
    pub fn world_id(&self) -> WorldId {
        self.world
    }

    /// Router this controller is registered with
    pub fn router(&self) -> Option<Rc<HitTestRouter>> {
        self.router.borrow().clone()
    }

    /// Widgets currently considered hovered, in hover order
    pub fn hovered_widgets(&self) -> Vec<WidgetRef> {
        self.hovered
            .borrow()
            .iter()
            .map(|entry| Rc::clone(&entry.widget))
            .collect()
    }

    /// Convert a world hit location to local widget coordinates
    pub fn local_hit(&self, world_location: &Vec3) -> Vec2 {
        self.surface.world_to_local(world_location)
    }

    /// Make `hit` the router's hit and optionally simulate hover transitions
    ///
    /// With `simulate_hover`, widgets that left the hit path get a leave
    /// event and widgets new to it get an enter event. Widgets that stay
    /// hovered get nothing.
    pub fn set_custom_hit(&self, hit: &HitResult, simulate_hover: bool) {
        if self.surface.widget().is_some() {
            if let Some(router) = self.router() {
                router.set_forced_hit(hit.clone());
            }
        }

        if !simulate_hover {
            return;
        }

        let Some(path) = self.resolve_widget_path(hit) else {
            return;
        };
        self.reconcile_hover(path);
    }

    /// Stop forcing this controller's last custom hit
    pub fn clear_custom_hit(&self) {
        if let Some(router) = self.router() {
            router.clear_forced_hit();
        }
    }

    /// Give user focus to the surface's widget on behalf of `player_controller`
    pub fn focus(&self, player_controller: PlayerControllerId) {
        let Some(player) = self.host.local_player_for(player_controller) else {
            return;
        };
        if let Some(widget) = self.surface.widget() {
            self.host.set_user_focus(player, &widget);
        }
    }

    /// Emulate a pointer press at `hit`
    pub fn emulate_touch_down(&self, hit: &HitResult, press_primary: bool) {
        self.emulate_pointer(hit, press_primary, PointerAction::Down);
    }

    /// Emulate a pointer release at `hit`
    pub fn emulate_touch_up(&self, hit: &HitResult, press_primary: bool) {
        self.emulate_pointer(hit, press_primary, PointerAction::Up);
    }

    /// Emulate a pointer move at `hit`
    pub fn emulate_touch_move(&self, hit: &HitResult, press_primary: bool) {
        self.emulate_pointer(hit, press_primary, PointerAction::Move);
    }

    /// Emulate pressing the activate key on the widgets at `hit`
    pub fn emulate_activate_key_down(&self, hit: &HitResult) {
        self.emulate_key(hit, KeyAction::Down);
    }

    /// Emulate releasing the activate key on the widgets at `hit`
    pub fn emulate_activate_key_up(&self, hit: &HitResult) {
        self.emulate_key(hit, KeyAction::Up);
    }

    /// Widget path under `hit`, or `None` while the surface is not laid out
    fn resolve_widget_path(&self, hit: &HitResult) -> Option<Vec<WidgetAndPointer>> {
        if !self.surface.has_valid_hit_test_grid() {
            log::trace!("SurfaceController {:?}: hit-test grid not ready", self.component_id());
            return None;
        }
        Some(self.surface.hit_widget_path(&hit.location, false, self.interaction.cursor_radius))
    }

    fn reconcile_hover(&self, path: Vec<WidgetAndPointer>) {
        let (left, entered) = {
            let mut hovered = self.hovered.borrow_mut();
            let (stayed, left): (Vec<_>, Vec<_>) = hovered
                .drain(..)
                .partition(|previous| path.contains(previous));
            let entered: Vec<WidgetAndPointer> = path
                .into_iter()
                .filter(|candidate| !stayed.contains(candidate))
                .collect();

            hovered.extend(stayed);
            hovered.extend(entered.iter().cloned());
            (left, entered)
        };

        for previous in &left {
            let event = self.pointer_event(&previous.pointer, false);
            previous.widget.on_mouse_leave(&event);
            self.recapture_focus();
        }

        for current in &entered {
            let event = self.pointer_event(&current.pointer, false);
            current.widget.on_mouse_enter(&current.geometry, &event);
        }

        if !left.is_empty() || !entered.is_empty() {
            log::debug!(
                "SurfaceController {:?}: hover -{} +{}",
                self.component_id(),
                left.len(),
                entered.len()
            );
        }
    }

    /// Leaving a widget releases pointer capture in the host; take focus
    /// back so the VR ray keeps driving this surface.
    fn recapture_focus(&self) {
        let (Some(player), Some(widget)) = (self.surface.owner_player(), self.surface.widget()) else {
            return;
        };

        self.host.set_user_focus(player, &widget);
        if let Some(player_controller) = self.host.player_controller_for(player) {
            self.host.set_input_mode(player_controller, InputMode::GameOnly);
        }
    }

    fn emulate_pointer(&self, hit: &HitResult, press_primary: bool, action: PointerAction) {
        let Some(path) = self.resolve_widget_path(hit) else {
            return;
        };

        log::trace!(
            "SurfaceController {:?}: touch {:?} on {} widgets",
            self.component_id(),
            action,
            path.len()
        );

        for entry in &path {
            let event = self.pointer_event(&entry.pointer, press_primary);
            match action {
                PointerAction::Down => {
                    let reply = entry.widget.on_mouse_button_down(&entry.geometry, &event);
                    self.process_reply(&reply, &event);
                }
                PointerAction::Up => {
                    let reply = entry.widget.on_mouse_button_up(&entry.geometry, &event);
                    self.process_reply(&reply, &event);
                }
                PointerAction::Move => {
                    entry.widget.on_mouse_move(&entry.geometry, &event);
                }
            }
        }
    }

    fn emulate_key(&self, hit: &HitResult, action: KeyAction) {
        let Some(path) = self.resolve_widget_path(hit) else {
            return;
        };

        let event = KeyEvent::new(
            self.interaction.activate_key,
            ModifierKeys::empty(),
            self.interaction.user_index,
        );
        for entry in &path {
            match action {
                KeyAction::Down => entry.widget.on_key_down(&entry.geometry, &event),
                KeyAction::Up => entry.widget.on_key_up(&entry.geometry, &event),
            };
        }
    }

    /// Hand a reply to the host against the router's current path
    ///
    /// The path is rebuilt with neutral geometry and coordinate: the real
    /// position is the forced 3D hit, not a screen cursor.
    fn process_reply(&self, reply: &Reply, event: &PointerEvent) {
        let widgets = self
            .router()
            .map(|router| router.bubble_path_and_virtual_cursors(&Geometry::default(), Vec2::zeros(), false))
            .unwrap_or_default();

        self.host
            .process_reply(&WidgetPath::new(widgets), reply, event, self.interaction.user_index);
    }

    fn pointer_event(&self, pointer: &VirtualPointerPosition, press_primary: bool) -> PointerEvent {
        PointerEvent::touch(
            self.interaction.user_index,
            self.interaction.pointer_index,
            pointer.current,
            pointer.last,
            press_primary,
        )
    }
}
