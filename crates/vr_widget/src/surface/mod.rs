//! Widget surfaces placed in the 3D world
//!
//! A surface is a UI widget rendered onto a quad in the scene. The host's
//! rendering layer implements [`WidgetSurface`]; [`SurfaceController`] adds
//! VR ray interaction on top of it.

pub mod quad;
pub mod controller;

pub use quad::WidgetQuad;
pub use controller::{ActivationError, SurfaceController};

use crate::config::SurfaceConfig;
use crate::foundation::math::{Vec2, Vec3};
use crate::physics::ComponentId;
use crate::ui::{WidgetAndPointer, WidgetRef};
use crate::world::LocalPlayerId;

/// Rendering-side view of a world-space widget surface
pub trait WidgetSurface {
    /// Component identity reported by traces that hit this surface
    fn component_id(&self) -> ComponentId;

    /// Surface settings (space, draw size, interaction distance, rotation convention)
    fn config(&self) -> &SurfaceConfig;

    /// Root widget currently rendered on the surface, if any
    fn widget(&self) -> Option<WidgetRef>;

    /// World-space position of the surface component
    fn world_position(&self) -> Vec3;

    /// World-space forward axis of the surface component
    fn forward_vector(&self) -> Vec3;

    /// World-space up axis of the surface component
    fn up_vector(&self) -> Vec3;

    /// Project a world-space location into local widget coordinates
    fn world_to_local(&self, world_location: &Vec3) -> Vec2;

    /// Whether the surface has been laid out and painted at least once
    fn has_valid_hit_test_grid(&self) -> bool;

    /// Widgets under a world-space location, leaf first
    fn hit_widget_path(
        &self,
        world_location: &Vec3,
        ignore_enabled: bool,
        cursor_radius: f32,
    ) -> Vec<WidgetAndPointer>;

    /// Local player owning the surface's actor, if any
    fn owner_player(&self) -> Option<LocalPlayerId>;

    /// Widget draw size
    fn draw_size(&self) -> Vec2 {
        self.config().draw_size()
    }

    /// Maximum trace-start distance at which hits are accepted
    fn max_interaction_distance(&self) -> f32 {
        self.config().max_interaction_distance
    }

    /// Axis the widget faces along, per the configured rotation convention
    fn facing_vector(&self) -> Vec3 {
        if self.config().uses_legacy_rotation() {
            self.up_vector()
        } else {
            self.forward_vector()
        }
    }
}
