//! Layout geometry and virtual cursor positions

use crate::foundation::math::Vec2;

/// Offset and uniform scale applied when arranging a child inside its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTransform {
    /// Uniform scale relative to the parent
    pub scale: f32,
    /// Translation in parent-local units
    pub translation: Vec2,
}

impl Default for LayoutTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl LayoutTransform {
    /// Transform that leaves the child where the parent is
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            translation: Vec2::zeros(),
        }
    }

    /// Pure translation
    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            scale: 1.0,
            translation,
        }
    }
}

/// Arranged size and absolute placement of a widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Size in the widget's own local space
    pub local_size: Vec2,
    /// Position of the local origin in absolute (desktop) space
    pub absolute_position: Vec2,
    /// Local-to-absolute uniform scale
    pub scale: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            local_size: Vec2::zeros(),
            absolute_position: Vec2::zeros(),
            scale: 1.0,
        }
    }
}

impl Geometry {
    /// Create a geometry from size, absolute position and scale
    pub fn new(local_size: Vec2, absolute_position: Vec2, scale: f32) -> Self {
        Self {
            local_size,
            absolute_position,
            scale,
        }
    }

    /// Create a child geometry of the given size, placed by `transform`
    pub fn make_child(&self, local_size: Vec2, transform: LayoutTransform) -> Self {
        Self {
            local_size,
            absolute_position: self.absolute_position + transform.translation * self.scale,
            scale: self.scale * transform.scale,
        }
    }

    /// Convert an absolute coordinate into this geometry's local space
    pub fn absolute_to_local(&self, absolute: Vec2) -> Vec2 {
        if self.scale.abs() <= f32::EPSILON {
            return Vec2::zeros();
        }
        (absolute - self.absolute_position) / self.scale
    }

    /// Convert a local coordinate into absolute space
    pub fn local_to_absolute(&self, local: Vec2) -> Vec2 {
        self.absolute_position + local * self.scale
    }

    /// Check whether an absolute point lies inside the geometry, inflated by `radius` absolute units
    pub fn contains_absolute(&self, absolute: Vec2, radius: f32) -> bool {
        let min = self.absolute_position - Vec2::new(radius, radius);
        let max = self.absolute_position + self.local_size * self.scale + Vec2::new(radius, radius);

        absolute.x >= min.x && absolute.x <= max.x &&
        absolute.y >= min.y && absolute.y <= max.y
    }
}

/// Cursor position reported to a widget hosted in 3D
///
/// Both values are in the surface's local widget space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VirtualPointerPosition {
    /// Cursor position this frame
    pub current: Vec2,
    /// Cursor position on the previous hit
    pub last: Vec2,
}

impl VirtualPointerPosition {
    /// Create a position with distinct current and last values
    pub fn new(current: Vec2, last: Vec2) -> Self {
        Self { current, last }
    }

    /// Position with no movement since the last hit
    pub fn stationary(position: Vec2) -> Self {
        Self {
            current: position,
            last: position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_child_applies_translation_and_scale() {
        let parent = Geometry::new(Vec2::new(200.0, 100.0), Vec2::new(10.0, 20.0), 2.0);
        let child = parent.make_child(
            Vec2::new(50.0, 50.0),
            LayoutTransform::from_translation(Vec2::new(5.0, 5.0)),
        );

        assert_eq!(child.absolute_position, Vec2::new(20.0, 30.0));
        assert_eq!(child.scale, 2.0);
        assert_eq!(child.local_size, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_absolute_to_local_inverts_local_to_absolute() {
        let geometry = Geometry::new(Vec2::new(100.0, 100.0), Vec2::new(40.0, -10.0), 0.5);
        let local = Vec2::new(12.0, 30.0);

        assert_eq!(geometry.absolute_to_local(geometry.local_to_absolute(local)), local);
    }

    #[test]
    fn test_contains_absolute_edges_and_radius() {
        let geometry = Geometry::new(Vec2::new(100.0, 50.0), Vec2::new(0.0, 0.0), 1.0);

        assert!(geometry.contains_absolute(Vec2::new(0.0, 0.0), 0.0));
        assert!(geometry.contains_absolute(Vec2::new(100.0, 50.0), 0.0));
        assert!(!geometry.contains_absolute(Vec2::new(100.5, 25.0), 0.0));
        assert!(geometry.contains_absolute(Vec2::new(100.5, 25.0), 1.0));
    }
}
