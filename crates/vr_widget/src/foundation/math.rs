//! Math utilities and types
//!
//! Provides the math types used by surfaces and hit results.
//!
//! Component space follows the widget-surface convention: +X is the
//! surface's forward (facing) axis, +Y points right across the widget and
//! +Z points up.

pub use nalgebra::{Quaternion, Unit, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Apply this transform to a point (component space → world space)
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.position + self.rotation * point.component_mul(&self.scale)
    }

    /// Apply the inverse of this transform to a point (world space → component space)
    pub fn inverse_transform_point(&self, point: &Vec3) -> Vec3 {
        let unrotated = self.rotation.inverse() * (point - self.position);
        Vec3::new(
            safe_div(unrotated.x, self.scale.x),
            safe_div(unrotated.y, self.scale.y),
            safe_div(unrotated.z, self.scale.z),
        )
    }

    /// World-space forward axis (+X in component space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::x()
    }

    /// World-space right axis (+Y in component space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }

    /// World-space up axis (+Z in component space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::z()
    }
}

// Degenerate scale collapses the axis instead of producing NaN.
fn safe_div(value: f32, scale: f32) -> f32 {
    if scale.abs() <= f32::EPSILON {
        0.0
    } else {
        value / scale
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inverse_transform_round_trip() {
        let transform = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_axis_angle(&Vec3::z_axis(), utils::deg_to_rad(90.0)),
            scale: Vec3::new(2.0, 2.0, 2.0),
        };

        let local = Vec3::new(0.5, -1.0, 4.0);
        let world = transform.transform_point(&local);
        let back = transform.inverse_transform_point(&world);

        assert_relative_eq!(back, local, epsilon = 1e-5);
    }

    #[test]
    fn test_axes_follow_rotation() {
        let transform = Transform::from_position_rotation(
            Vec3::zeros(),
            Quat::from_axis_angle(&Vec3::z_axis(), constants::HALF_PI),
        );

        assert_relative_eq!(transform.forward(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(transform.right(), Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(transform.up(), Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_scale_does_not_produce_nan() {
        let transform = Transform {
            scale: Vec3::new(0.0, 1.0, 1.0),
            ..Transform::identity()
        };

        let local = transform.inverse_transform_point(&Vec3::new(5.0, 1.0, 1.0));
        assert_eq!(local.x, 0.0);
    }
}
