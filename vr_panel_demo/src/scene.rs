//! Demo scene: one world, one button panel and a logging UI host

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vr_widget::config::SurfaceConfig;
use vr_widget::foundation::math::{Transform, Vec2, Vec3};
use vr_widget::foundation::time::FrameCounter;
use vr_widget::physics::{ComponentId, HitResult, Ray};
use vr_widget::surface::{WidgetQuad, WidgetSurface};
use vr_widget::ui::{
    Geometry, HitTestGrid, InputMode, PointerEvent, Reply, UiHost, Widget, WidgetAndPointer,
    WidgetPath, WidgetRef,
};
use vr_widget::world::{GameWorld, LocalPlayerId, PlayerControllerId, WorldId};

/// Game world with a single local player and no desktop cursor
pub struct DemoWorld {
    id: WorldId,
    pub frames: FrameCounter,
}

impl DemoWorld {
    pub fn new(id: WorldId) -> Self {
        Self {
            id,
            frames: FrameCounter::new(),
        }
    }
}

impl GameWorld for DemoWorld {
    fn id(&self) -> WorldId {
        self.id
    }

    fn is_game_world(&self) -> bool {
        true
    }

    fn frame_number(&self) -> u64 {
        self.frames.frame_number()
    }

    fn primary_player_controller(&self) -> Option<PlayerControllerId> {
        Some(PlayerControllerId(0))
    }

    fn trace_screen_position(&self, _controller: PlayerControllerId, screen_position: Vec2) -> Option<HitResult> {
        // Only the VR ray drives the panel
        log::trace!("DemoWorld: no desktop trace at {:?}", screen_position);
        None
    }
}

/// Clickable button that logs what happens to it
pub struct ButtonWidget {
    label: String,
    pressed: Cell<bool>,
    clicks: Cell<u32>,
}

impl ButtonWidget {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pressed: Cell::new(false),
            clicks: Cell::new(0),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn clicks(&self) -> u32 {
        self.clicks.get()
    }
}

impl Widget for ButtonWidget {
    fn on_mouse_enter(&self, _geometry: &Geometry, event: &PointerEvent) {
        log::info!("[{}] hovered at {:?}", self.label, event.screen_space_position);
    }

    fn on_mouse_leave(&self, _event: &PointerEvent) {
        self.pressed.set(false);
        log::info!("[{}] unhovered", self.label);
    }

    fn on_mouse_button_down(&self, _geometry: &Geometry, event: &PointerEvent) -> Reply {
        if !event.is_primary_pressed() {
            return Reply::unhandled();
        }
        self.pressed.set(true);
        Reply::handled().capture_mouse()
    }

    fn on_mouse_button_up(&self, _geometry: &Geometry, _event: &PointerEvent) -> Reply {
        if !self.pressed.replace(false) {
            return Reply::unhandled();
        }
        self.clicks.set(self.clicks.get() + 1);
        log::info!("[{}] clicked ({} total)", self.label, self.clicks.get());
        Reply::handled().release_mouse_capture()
    }
}

/// Background panel holding the buttons
struct PanelBackground;

impl Widget for PanelBackground {}

/// A 500x500 panel with a row of three buttons
pub struct PanelSurface {
    id: ComponentId,
    config: SurfaceConfig,
    quad: WidgetQuad,
    grid: RefCell<HitTestGrid>,
    root: WidgetRef,
    buttons: Vec<Rc<ButtonWidget>>,
}

impl PanelSurface {
    pub fn new(id: ComponentId, transform: Transform, config: SurfaceConfig) -> Self {
        let quad = WidgetQuad::from_config(transform, &config);
        let size = quad.draw_size();
        let root: WidgetRef = Rc::new(PanelBackground);

        let mut grid = HitTestGrid::new();
        let root_key = grid.add_root(Rc::clone(&root), Geometry::new(size, Vec2::zeros(), 1.0));

        let button_size = Vec2::new(size.x * 0.26, size.y * 0.2);
        let gap = (size.x - 3.0 * button_size.x) / 4.0;
        let top = (size.y - button_size.y) * 0.5;
        let buttons: Vec<Rc<ButtonWidget>> = ["Play", "Options", "Quit"]
            .iter()
            .map(|label| Rc::new(ButtonWidget::new(*label)))
            .collect();

        for (index, button) in buttons.iter().enumerate() {
            let left = gap + index as f32 * (button_size.x + gap);
            grid.add_child(
                root_key,
                Rc::clone(button) as WidgetRef,
                Geometry::new(button_size, Vec2::new(left, top), 1.0),
            );
        }
        grid.mark_painted();

        Self {
            id,
            config,
            quad,
            grid: RefCell::new(grid),
            root,
            buttons,
        }
    }

    pub fn buttons(&self) -> &[Rc<ButtonWidget>] {
        &self.buttons
    }

    /// Intersect a controller ray with the panel quad
    pub fn intersect(&self, ray: &Ray) -> Option<HitResult> {
        let transform = self.quad.transform();
        let normal = transform.forward();

        let denominator = ray.direction.dot(&normal);
        if denominator.abs() < 1e-6 {
            return None; // Ray parallel to the panel
        }

        let t = (transform.position - ray.origin).dot(&normal) / denominator;
        if t < 0.0 {
            return None;
        }

        let hit = HitResult::from_ray(ray, t, normal, self.id);
        let local = self.quad.world_to_local(&hit.location);
        let size = self.quad.draw_size();
        let inside = (0.0..=size.x).contains(&local.x) && (0.0..=size.y).contains(&local.y);
        inside.then_some(hit)
    }
}

impl WidgetSurface for PanelSurface {
    fn component_id(&self) -> ComponentId {
        self.id
    }

    fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    fn widget(&self) -> Option<WidgetRef> {
        Some(Rc::clone(&self.root))
    }

    fn world_position(&self) -> Vec3 {
        self.quad.transform().position
    }

    fn forward_vector(&self) -> Vec3 {
        self.quad.transform().forward()
    }

    fn up_vector(&self) -> Vec3 {
        self.quad.transform().up()
    }

    fn world_to_local(&self, world_location: &Vec3) -> Vec2 {
        self.quad.world_to_local(world_location)
    }

    fn has_valid_hit_test_grid(&self) -> bool {
        self.grid.borrow().is_valid()
    }

    fn hit_widget_path(&self, world_location: &Vec3, ignore_enabled: bool, cursor_radius: f32) -> Vec<WidgetAndPointer> {
        self.quad.hit_widget_path(&self.grid.borrow(), world_location, ignore_enabled, cursor_radius)
    }

    fn owner_player(&self) -> Option<LocalPlayerId> {
        Some(LocalPlayerId(0))
    }
}

/// UI host that only logs what it is asked to do
pub struct LoggingHost;

impl UiHost for LoggingHost {
    fn local_player_for(&self, controller: PlayerControllerId) -> Option<LocalPlayerId> {
        Some(LocalPlayerId(controller.0))
    }

    fn player_controller_for(&self, player: LocalPlayerId) -> Option<PlayerControllerId> {
        Some(PlayerControllerId(player.0))
    }

    fn set_user_focus(&self, player: LocalPlayerId, _widget: &WidgetRef) {
        log::debug!("LoggingHost: focus for {:?}", player);
    }

    fn set_input_mode(&self, controller: PlayerControllerId, mode: InputMode) {
        log::debug!("LoggingHost: {:?} input mode {:?}", controller, mode);
    }

    fn process_reply(&self, path: &WidgetPath, reply: &Reply, _event: &PointerEvent, user_index: u32) {
        log::debug!(
            "LoggingHost: user {} reply {:?} over {} widgets",
            user_index,
            reply,
            path.len()
        );
    }
}
