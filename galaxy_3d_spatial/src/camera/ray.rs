/// Picking ray for the spatial index.
///
/// A ray is `origin + t * direction` for `t` in `[0, far]`. `far` is measured
/// in units of `direction`, so `Ray::segment(a, b)` covers exactly `a → b`.

use glam::DVec3;
use crate::bounds::AABB;

/// Picking ray or ray segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: DVec3,
    /// Direction (not required to be normalized)
    pub direction: DVec3,
    /// Largest accepted parameter along `direction`
    pub far: f64,
}

impl Ray {
    /// Unbounded ray starting at `origin`.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction, far: f64::INFINITY }
    }

    /// Segment from `from` to `to`.
    pub fn segment(from: DVec3, to: DVec3) -> Self {
        Self { origin: from, direction: to - from, far: 1.0 }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Parameter interval `[t_enter, t_exit]` of the ray inside `aabb`, if any.
    ///
    /// Slab test. Axes where the direction is zero are handled explicitly so
    /// a ray grazing a face never produces NaN.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<(f64, f64)> {
        let mut t_enter = 0.0_f64;
        let mut t_exit = self.far;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let direction = self.direction[axis];
            let (min, max) = (aabb.min[axis], aabb.max[axis]);

            if direction == 0.0 {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t0 = (min - origin) * inv;
            let mut t1 = (max - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some((t_enter, t_exit))
    }

    /// `true` if the ray touches `aabb`.
    #[inline]
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.intersect_aabb(aabb).is_some()
    }
}
