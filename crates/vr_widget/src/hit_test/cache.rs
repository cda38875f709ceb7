//! Per-frame hit cache with forced-hit override
//!
//! Staleness key is `(frame_number, screen_position)`. A forced hit takes
//! precedence over the key entirely. Failed traces are never cached.

use std::cell::RefCell;

use crate::foundation::math::Vec2;
use crate::physics::HitResult;

#[derive(Debug, Clone)]
struct CachedTrace {
    frame_number: u64,
    screen_position: Vec2,
    hit: HitResult,
}

#[derive(Debug, Default)]
struct CacheState {
    traced: Option<CachedTrace>,
    forced: Option<HitResult>,
}

/// Hit cache shared by every query of one router
#[derive(Debug, Default)]
pub(crate) struct HitCache {
    state: RefCell<CacheState>,
}

impl HitCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Resolve a hit for `screen_position` in `frame_number`
    ///
    /// Order: forced hit, then a cached trace with a matching key, then a
    /// fresh `trace` whose success replaces the cached entry.
    pub(crate) fn resolve<F>(&self, frame_number: u64, screen_position: Vec2, trace: F) -> Option<HitResult>
    where
        F: FnOnce() -> Option<HitResult>,
    {
        {
            let state = self.state.borrow();
            if let Some(forced) = &state.forced {
                return Some(forced.clone());
            }
            if let Some(cached) = &state.traced {
                if cached.frame_number == frame_number && cached.screen_position == screen_position {
                    log::trace!("Hit cache: reuse frame {} at {:?}", frame_number, screen_position);
                    return Some(cached.hit.clone());
                }
            }
        }

        // Borrow released: the trace runs host code
        let hit = trace()?;
        self.state.borrow_mut().traced = Some(CachedTrace {
            frame_number,
            screen_position,
            hit: hit.clone(),
        });
        Some(hit)
    }

    pub(crate) fn set_forced(&self, hit: HitResult) {
        self.state.borrow_mut().forced = Some(hit);
    }

    pub(crate) fn clear_forced(&self) {
        self.state.borrow_mut().forced = None;
    }

    pub(crate) fn forced(&self) -> Option<HitResult> {
        self.state.borrow().forced.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::physics::ComponentId;
    use std::cell::Cell;

    fn hit_on(component: u64) -> HitResult {
        HitResult {
            location: Vec3::zeros(),
            impact_point: Vec3::zeros(),
            impact_normal: Vec3::x(),
            trace_start: Vec3::new(-1.0, 0.0, 0.0),
            distance: 1.0,
            component: Some(ComponentId(component)),
        }
    }

    #[test]
    fn test_same_key_skips_trace() {
        let cache = HitCache::new();
        let traces = Cell::new(0);
        let trace = || {
            traces.set(traces.get() + 1);
            Some(hit_on(1))
        };

        assert!(cache.resolve(3, Vec2::new(1.0, 1.0), trace).is_some());
        assert!(cache.resolve(3, Vec2::new(1.0, 1.0), trace).is_some());
        assert_eq!(traces.get(), 1);

        cache.resolve(4, Vec2::new(1.0, 1.0), trace);
        cache.resolve(4, Vec2::new(2.0, 1.0), trace);
        assert_eq!(traces.get(), 3);
    }

    #[test]
    fn test_failed_trace_is_retried() {
        let cache = HitCache::new();
        let traces = Cell::new(0);

        let miss = || {
            traces.set(traces.get() + 1);
            None
        };
        assert!(cache.resolve(1, Vec2::zeros(), miss).is_none());
        assert!(cache.resolve(1, Vec2::zeros(), miss).is_none());
        assert_eq!(traces.get(), 2);
    }

    #[test]
    fn test_forced_hit_wins_until_cleared() {
        let cache = HitCache::new();
        cache.set_forced(hit_on(9));

        let hit = cache.resolve(100, Vec2::new(7.0, 7.0), || Some(hit_on(1)));
        assert_eq!(hit.unwrap().component, Some(ComponentId(9)));

        cache.clear_forced();
        let hit = cache.resolve(100, Vec2::new(7.0, 7.0), || Some(hit_on(1)));
        assert_eq!(hit.unwrap().component, Some(ComponentId(1)));
        assert!(cache.forced().is_none());
    }
}
