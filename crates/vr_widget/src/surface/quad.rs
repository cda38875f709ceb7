//! World ↔ widget projection for a flat quad surface
//!
//! The widget lies in the component's Y/Z plane: component +Y runs along
//! widget X and component +Z runs against widget Y (widget space grows
//! downward). The pivot is the normalized widget point sitting on the
//! component origin.

use std::cell::Cell;

use crate::config::SurfaceConfig;
use crate::foundation::math::{Transform, Vec2, Vec3};
use crate::ui::{HitTestGrid, WidgetAndPointer};

/// Placement of a widget quad in the world
///
/// Also remembers the last projected hit so widget paths can report both
/// the current and the previous cursor position.
#[derive(Debug)]
pub struct WidgetQuad {
    transform: Transform,
    draw_size: Vec2,
    pivot: Vec2,
    last_local_hit: Cell<Option<Vec2>>,
}

impl WidgetQuad {
    /// Create a quad with the given transform, draw size and pivot
    pub fn new(transform: Transform, draw_size: Vec2, pivot: Vec2) -> Self {
        Self {
            transform,
            draw_size,
            pivot,
            last_local_hit: Cell::new(None),
        }
    }

    /// Create a quad sized and pivoted from a surface config
    pub fn from_config(transform: Transform, config: &SurfaceConfig) -> Self {
        Self::new(transform, config.draw_size(), config.pivot())
    }

    /// Component transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Move the quad
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Widget draw size
    pub fn draw_size(&self) -> Vec2 {
        self.draw_size
    }

    /// Project a world-space location into widget coordinates
    pub fn world_to_local(&self, world_location: &Vec3) -> Vec2 {
        let local = self.transform.inverse_transform_point(world_location);
        Vec2::new(
            local.y + self.draw_size.x * self.pivot.x,
            self.draw_size.y * self.pivot.y - local.z,
        )
    }

    /// World-space location of a widget coordinate on the quad plane
    pub fn local_to_world(&self, local_widget: &Vec2) -> Vec3 {
        let local = Vec3::new(
            0.0,
            local_widget.x - self.draw_size.x * self.pivot.x,
            self.draw_size.y * self.pivot.y - local_widget.y,
        );
        self.transform.transform_point(&local)
    }

    /// Project a hit and return `(current, last)` widget coordinates
    ///
    /// The first hit reports itself as its own last position.
    pub fn track_hit(&self, world_location: &Vec3) -> (Vec2, Vec2) {
        let current = self.world_to_local(world_location);
        let last = self.last_local_hit.replace(Some(current)).unwrap_or(current);
        (current, last)
    }

    /// Resolve the widget path under a world location using a hit-test grid
    pub fn hit_widget_path(
        &self,
        grid: &HitTestGrid,
        world_location: &Vec3,
        ignore_enabled: bool,
        cursor_radius: f32,
    ) -> Vec<WidgetAndPointer> {
        let (current, last) = self.track_hit(world_location);
        grid.bubble_path(current, last, ignore_enabled, cursor_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{utils, Quat};
    use approx::assert_relative_eq;

    fn centered_quad(transform: Transform) -> WidgetQuad {
        WidgetQuad::new(transform, Vec2::new(200.0, 100.0), Vec2::new(0.5, 0.5))
    }

    #[test]
    fn test_origin_maps_to_pivot() {
        let quad = centered_quad(Transform::from_position(Vec3::new(5.0, 5.0, 5.0)));
        assert_relative_eq!(quad.world_to_local(&Vec3::new(5.0, 5.0, 5.0)), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_axes_map_to_widget_space() {
        let quad = centered_quad(Transform::identity());

        // +Y is widget right, +Z is widget up (smaller widget Y)
        assert_relative_eq!(quad.world_to_local(&Vec3::new(0.0, 100.0, 50.0)), Vec2::new(200.0, 0.0));
        assert_relative_eq!(quad.world_to_local(&Vec3::new(0.0, -100.0, -50.0)), Vec2::new(0.0, 100.0));
        // Depth along the facing axis does not affect the projection
        assert_relative_eq!(quad.world_to_local(&Vec3::new(30.0, 0.0, 0.0)), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_rotated_round_trip() {
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(135.0));
        let quad = centered_quad(Transform::from_position_rotation(Vec3::new(1.0, -2.0, 3.0), rotation));

        let widget_point = Vec2::new(42.0, 17.0);
        let world = quad.local_to_world(&widget_point);
        assert_relative_eq!(quad.world_to_local(&world), widget_point, epsilon = 1e-3);
    }

    #[test]
    fn test_track_hit_remembers_previous() {
        let quad = centered_quad(Transform::identity());

        let (first, first_last) = quad.track_hit(&Vec3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(first, first_last);

        let (second, second_last) = quad.track_hit(&Vec3::new(0.0, 10.0, 0.0));
        assert_relative_eq!(second, Vec2::new(110.0, 50.0));
        assert_relative_eq!(second_last, first);
    }
}
