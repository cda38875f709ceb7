//! Test doubles for the host world, UI framework and surfaces

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::{InteractionConfig, SurfaceConfig};
use crate::foundation::math::{Transform, Vec2, Vec3};
use crate::foundation::time::FrameCounter;
use crate::hit_test::RouterRegistry;
use crate::physics::{ComponentId, HitResult};
use crate::surface::{SurfaceController, WidgetQuad, WidgetSurface};
use crate::ui::{
    Geometry, HitTestGrid, InputMode, KeyEvent, PointerEvent, Reply, UiHost, Widget,
    WidgetAndPointer, WidgetPath, WidgetRef,
};
use crate::world::{GameWorld, LocalPlayerId, PlayerControllerId, WorldId};

pub const PLAYER: LocalPlayerId = LocalPlayerId(0);
pub const PLAYER_CONTROLLER: PlayerControllerId = PlayerControllerId(0);

/// Widget-space points on the standard panel
pub const LEFT_BUTTON_POINT: (f32, f32) = (50.0, 50.0);
pub const RIGHT_BUTTON_POINT: (f32, f32) = (150.0, 50.0);
pub const PANEL_GAP_POINT: (f32, f32) = (100.0, 50.0);

// ========================================================================
// World
// ========================================================================

pub struct TestWorld {
    id: WorldId,
    pub game_world: Cell<bool>,
    pub frames: FrameCounter,
    pub trace_result: RefCell<Option<HitResult>>,
    pub trace_calls: Cell<u32>,
}

impl TestWorld {
    pub fn new(id: u64) -> Rc<Self> {
        Rc::new(Self {
            id: WorldId(id),
            game_world: Cell::new(true),
            frames: FrameCounter::new(),
            trace_result: RefCell::new(None),
            trace_calls: Cell::new(0),
        })
    }
}

impl GameWorld for TestWorld {
    fn id(&self) -> WorldId {
        self.id
    }

    fn is_game_world(&self) -> bool {
        self.game_world.get()
    }

    fn frame_number(&self) -> u64 {
        self.frames.frame_number()
    }

    fn primary_player_controller(&self) -> Option<PlayerControllerId> {
        Some(PLAYER_CONTROLLER)
    }

    fn trace_screen_position(&self, _controller: PlayerControllerId, _screen_position: Vec2) -> Option<HitResult> {
        self.trace_calls.set(self.trace_calls.get() + 1);
        self.trace_result.borrow().clone()
    }
}

pub fn as_world(world: &Rc<TestWorld>) -> Rc<dyn GameWorld> {
    Rc::clone(world) as Rc<dyn GameWorld>
}

// ========================================================================
// Widgets
// ========================================================================

pub type EventLog = Rc<RefCell<Vec<String>>>;

pub struct RecordingWidget {
    name: &'static str,
    log: EventLog,
    pub last_pointer: Cell<Option<PointerEvent>>,
    pub last_key: Cell<Option<KeyEvent>>,
}

impl RecordingWidget {
    pub fn new(name: &'static str, log: &EventLog) -> Rc<Self> {
        Rc::new(Self {
            name,
            log: Rc::clone(log),
            last_pointer: Cell::new(None),
            last_key: Cell::new(None),
        })
    }

    fn record(&self, what: &str) {
        self.log.borrow_mut().push(format!("{}:{}", what, self.name));
    }
}

impl Widget for RecordingWidget {
    fn on_mouse_enter(&self, _geometry: &Geometry, event: &PointerEvent) {
        self.last_pointer.set(Some(*event));
        self.record("enter");
    }

    fn on_mouse_leave(&self, event: &PointerEvent) {
        self.last_pointer.set(Some(*event));
        self.record("leave");
    }

    fn on_mouse_button_down(&self, _geometry: &Geometry, event: &PointerEvent) -> Reply {
        self.last_pointer.set(Some(*event));
        self.record("down");
        Reply::handled().capture_mouse()
    }

    fn on_mouse_button_up(&self, _geometry: &Geometry, event: &PointerEvent) -> Reply {
        self.last_pointer.set(Some(*event));
        self.record("up");
        Reply::handled().release_mouse_capture()
    }

    fn on_mouse_move(&self, _geometry: &Geometry, event: &PointerEvent) -> Reply {
        self.last_pointer.set(Some(*event));
        self.record("move");
        Reply::unhandled()
    }

    fn on_key_down(&self, _geometry: &Geometry, event: &KeyEvent) -> Reply {
        self.last_key.set(Some(*event));
        self.record("key_down");
        Reply::handled()
    }

    fn on_key_up(&self, _geometry: &Geometry, event: &KeyEvent) -> Reply {
        self.last_key.set(Some(*event));
        self.record("key_up");
        Reply::handled()
    }
}

// ========================================================================
// Host UI
// ========================================================================

pub enum HostCall {
    Focus(LocalPlayerId, WidgetRef),
    InputMode(PlayerControllerId, InputMode),
    Reply {
        path: WidgetPath,
        reply: Reply,
        user_index: u32,
    },
}

#[derive(Default)]
pub struct TestHost {
    pub calls: RefCell<Vec<HostCall>>,
}

impl TestHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn focus_count(&self) -> usize {
        self.calls.borrow().iter().filter(|call| matches!(call, HostCall::Focus(..))).count()
    }

    pub fn reply_count(&self) -> usize {
        self.calls.borrow().iter().filter(|call| matches!(call, HostCall::Reply { .. })).count()
    }
}

impl UiHost for TestHost {
    fn local_player_for(&self, controller: PlayerControllerId) -> Option<LocalPlayerId> {
        (controller == PLAYER_CONTROLLER).then_some(PLAYER)
    }

    fn player_controller_for(&self, player: LocalPlayerId) -> Option<PlayerControllerId> {
        (player == PLAYER).then_some(PLAYER_CONTROLLER)
    }

    fn set_user_focus(&self, player: LocalPlayerId, widget: &WidgetRef) {
        self.calls.borrow_mut().push(HostCall::Focus(player, Rc::clone(widget)));
    }

    fn set_input_mode(&self, controller: PlayerControllerId, mode: InputMode) {
        self.calls.borrow_mut().push(HostCall::InputMode(controller, mode));
    }

    fn process_reply(&self, path: &WidgetPath, reply: &Reply, _event: &PointerEvent, user_index: u32) {
        self.calls.borrow_mut().push(HostCall::Reply {
            path: path.clone(),
            reply: *reply,
            user_index,
        });
    }
}

pub fn as_host(host: &Rc<TestHost>) -> Rc<dyn UiHost> {
    Rc::clone(host) as Rc<dyn UiHost>
}

// ========================================================================
// Surface
// ========================================================================

pub struct TestSurface {
    id: ComponentId,
    config: SurfaceConfig,
    pub quad: WidgetQuad,
    pub grid: RefCell<HitTestGrid>,
    pub root: RefCell<Option<WidgetRef>>,
    pub owner: Option<LocalPlayerId>,
}

impl WidgetSurface for TestSurface {
    fn component_id(&self) -> ComponentId {
        self.id
    }

    fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    fn widget(&self) -> Option<WidgetRef> {
        self.root.borrow().clone()
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
        self.owner
    }
}

/// A 200x100 panel at `position` facing +X with two 80x80 buttons
pub struct Panel {
    pub surface: Rc<TestSurface>,
    pub root: Rc<RecordingWidget>,
    pub left: Rc<RecordingWidget>,
    pub right: Rc<RecordingWidget>,
}

impl Panel {
    pub fn build(component: u64, position: Vec3, config: SurfaceConfig, log: &EventLog) -> Self {
        let root = RecordingWidget::new("panel", log);
        let left = RecordingWidget::new("left", log);
        let right = RecordingWidget::new("right", log);

        let mut grid = HitTestGrid::new();
        let root_key = grid.add_root(
            Rc::clone(&root) as WidgetRef,
            Geometry::new(Vec2::new(200.0, 100.0), Vec2::zeros(), 1.0),
        );
        grid.add_child(
            root_key,
            Rc::clone(&left) as WidgetRef,
            Geometry::new(Vec2::new(80.0, 80.0), Vec2::new(10.0, 10.0), 1.0),
        );
        grid.add_child(
            root_key,
            Rc::clone(&right) as WidgetRef,
            Geometry::new(Vec2::new(80.0, 80.0), Vec2::new(110.0, 10.0), 1.0),
        );
        grid.mark_painted();

        let config = SurfaceConfig {
            draw_size: [200.0, 100.0],
            ..config
        };
        let surface = Rc::new(TestSurface {
            id: ComponentId(component),
            quad: WidgetQuad::from_config(Transform::from_position(position), &config),
            config,
            grid: RefCell::new(grid),
            root: RefCell::new(Some(Rc::clone(&root) as WidgetRef)),
            owner: Some(PLAYER),
        });

        Self {
            surface,
            root,
            left,
            right,
        }
    }

    pub fn standard(component: u64, log: &EventLog) -> Self {
        Self::build(component, Vec3::zeros(), SurfaceConfig::default(), log)
    }

    pub fn as_surface(&self) -> Rc<dyn WidgetSurface> {
        Rc::clone(&self.surface) as Rc<dyn WidgetSurface>
    }

    /// Front-facing hit on a widget point, traced from `distance` in front of it
    pub fn hit_at(&self, point: (f32, f32), distance: f32) -> HitResult {
        let location = self.surface.quad.local_to_world(&Vec2::new(point.0, point.1));
        let trace_start = location + self.surface.quad.transform().forward() * distance;
        HitResult {
            location,
            impact_point: location,
            impact_normal: self.surface.quad.transform().forward(),
            trace_start,
            distance,
            component: Some(self.surface.component_id()),
        }
    }
}

pub fn new_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn drain(log: &EventLog) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

pub fn widget(widget: &Rc<RecordingWidget>) -> WidgetRef {
    Rc::clone(widget) as WidgetRef
}

pub fn activate(
    panel: &Panel,
    host: &Rc<TestHost>,
    world: &Rc<TestWorld>,
    registry: &mut RouterRegistry,
) -> Rc<SurfaceController> {
    SurfaceController::activate(
        panel.as_surface(),
        as_host(host),
        InteractionConfig::default(),
        &as_world(world),
        registry,
    )
    .expect("panel should activate in a game world")
}
