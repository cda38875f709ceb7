//! Ray and hit result types

use crate::foundation::math::Vec3;

/// Identity of a primitive component that can be hit by a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub u64);

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (should be normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a world trace
///
/// Produced by the host's collision system (or a VR controller trace) and
/// treated as immutable input. `location` is the world-space position the
/// surface projects into widget coordinates; for line traces it equals
/// `impact_point`.
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    /// World-space location of the hit
    pub location: Vec3,
    /// World-space point of impact on the hit surface
    pub impact_point: Vec3,
    /// Normal of the hit surface at the impact point
    pub impact_normal: Vec3,
    /// Start of the trace that produced this hit
    pub trace_start: Vec3,
    /// Distance from the trace start to the impact point
    pub distance: f32,
    /// Component that was hit, if the trace struck one
    pub component: Option<ComponentId>,
}

impl HitResult {
    /// Build a hit for a ray striking `component` at distance `t`
    pub fn from_ray(ray: &Ray, t: f32, normal: Vec3, component: ComponentId) -> Self {
        let point = ray.point_at(t);
        Self {
            location: point,
            impact_point: point,
            impact_normal: normal,
            trace_start: ray.origin,
            distance: t,
            component: Some(component),
        }
    }

    /// Vector from the trace start to the impact point
    pub fn trace_vector(&self) -> Vec3 {
        self.impact_point - self.trace_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_ray_fills_points() {
        let ray = Ray::new(Vec3::new(-10.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        let hit = HitResult::from_ray(&ray, 10.0, Vec3::new(-1.0, 0.0, 0.0), ComponentId(7));

        assert_relative_eq!(hit.location, Vec3::zeros());
        assert_relative_eq!(hit.impact_point, hit.location);
        assert_relative_eq!(hit.trace_vector(), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(hit.component, Some(ComponentId(7)));
    }
}
