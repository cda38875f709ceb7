//! # VR Widget
//!
//! VR ray interaction for UI widgets rendered onto surfaces in the 3D world.
//!
//! ## Features
//!
//! - **Custom hit-test routing**: one [`HitTestRouter`] per world answers the
//!   host viewport's hit-testing for every world-space widget surface
//! - **Forced hits**: a VR controller trace overrides 2D cursor resolution
//! - **Pointer emulation**: hover enter/leave, press, release, move and
//!   activate-key events synthesized from 3D hits
//! - **Per-frame caching**: repeated queries in a frame trace once
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use vr_widget::prelude::*;
//!
//! fn wire_up(
//!     surface: Rc<dyn WidgetSurface>,
//!     host: Rc<dyn UiHost>,
//!     world: Rc<dyn GameWorld>,
//!     controller_hit: HitResult,
//! ) -> Result<(), ActivationError> {
//!     let mut registry = RouterRegistry::new();
//!     let panel = SurfaceController::activate(
//!         surface,
//!         host,
//!         InteractionConfig::default(),
//!         &world,
//!         &mut registry,
//!     )?;
//!
//!     // Every frame the VR ray hits the panel:
//!     panel.set_custom_hit(&controller_hit, true);
//!
//!     // Trigger pressed / released:
//!     panel.emulate_touch_down(&controller_hit, true);
//!     panel.emulate_touch_up(&controller_hit, true);
//!
//!     panel.deactivate(&mut registry);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod world;
pub mod ui;
pub mod surface;
pub mod hit_test;

#[cfg(test)]
mod tests;

pub use hit_test::{CustomHitTestPath, HitTestRouter, RouterRegistry};
pub use surface::{ActivationError, SurfaceController, WidgetSurface};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, InteractionConfig, SurfaceConfig, VrWidgetConfig, WidgetSpace},
        foundation::math::{Transform, Vec2, Vec3},
        hit_test::{CustomHitTestPath, HitTestRouter, RouterRegistry},
        physics::{ComponentId, HitResult, Ray},
        surface::{ActivationError, SurfaceController, WidgetQuad, WidgetSurface},
        ui::{HitTestGrid, UiHost, Widget, WidgetRef},
        world::{GameWorld, LocalPlayerId, PlayerControllerId, WorldId},
    };
}
