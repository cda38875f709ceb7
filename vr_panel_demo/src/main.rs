//! VR panel demo
//!
//! Sweeps a simulated controller ray across a world-space button panel,
//! presses the trigger over each button and logs the resulting widget
//! events. Pass a `.toml` or `.ron` config path to override the defaults.

mod scene;

use std::rc::Rc;

use thiserror::Error;
use vr_widget::foundation::logging;
use vr_widget::prelude::*;

use scene::{DemoWorld, LoggingHost, PanelSurface};

const SWEEP_STEPS: u32 = 40;
const CONTROLLER_DISTANCE: f32 = 300.0;

#[derive(Error, Debug)]
enum DemoError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("panel activation failed: {0}")]
    Activation(#[from] ActivationError),
}

fn main() {
    logging::init();

    if let Err(error) = run() {
        log::error!("vr_panel_demo failed: {}", error);
        std::process::exit(1);
    }
}

fn load_config() -> Result<VrWidgetConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            Ok(VrWidgetConfig::load_from_file(&path)?)
        }
        None => Ok(VrWidgetConfig::default()),
    }
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;

    let world = Rc::new(DemoWorld::new(WorldId(1)));
    let game_world: Rc<dyn GameWorld> = Rc::clone(&world) as Rc<dyn GameWorld>;
    let panel_position = Vec3::new(0.0, 0.0, 150.0);
    let panel = Rc::new(PanelSurface::new(
        ComponentId(1),
        Transform::from_position(panel_position),
        config.surface.clone(),
    ));

    let mut registry = RouterRegistry::new();
    let controller = SurfaceController::activate(
        Rc::clone(&panel) as Rc<dyn WidgetSurface>,
        Rc::new(LoggingHost),
        config.interaction.clone(),
        &game_world,
        &mut registry,
    )?;

    // Controller held in front of the panel, sweeping slightly past both edges
    let origin = panel_position + Vec3::x() * CONTROLLER_DISTANCE;
    let half_width = config.surface.draw_size[0] * 0.6;
    let mut pressed = false;

    for step in 0..=SWEEP_STEPS {
        world.frames.advance();

        let offset = -half_width + 2.0 * half_width * step as f32 / SWEEP_STEPS as f32;
        let target = panel_position + Vec3::y() * offset;
        let ray = Ray::new(origin, target - origin);

        let Some(hit) = panel.intersect(&ray) else {
            log::debug!("frame {}: ray misses the panel", world.frames.frame_number());
            controller.clear_custom_hit();
            continue;
        };

        controller.set_custom_hit(&hit, true);
        controller.emulate_touch_move(&hit, pressed);

        // Pull the trigger on every fourth step, release on the next
        if step % 4 == 0 {
            controller.emulate_touch_down(&hit, true);
            pressed = true;
        } else if pressed {
            controller.emulate_touch_up(&hit, true);
            pressed = false;
        }
    }

    for button in panel.buttons() {
        log::info!("{}: {} clicks", button.label(), button.clicks());
    }

    controller.deactivate(&mut registry);
    Ok(())
}
