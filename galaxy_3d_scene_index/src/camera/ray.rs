/// Ray - half-line used for picking queries.

use glam::Vec3;
use crate::scene::AABB;

/// A ray starting at `origin` and extending along `direction`.
///
/// Only the segment `t ∈ [0, max_distance]` is considered by intersection
/// tests. The direction does not need to be normalized; `t` is then scaled
/// by its length.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world space
    pub origin: Vec3,
    /// Direction of the ray
    pub direction: Vec3,
    /// Farthest parameter considered (`f32::INFINITY` for an unbounded ray)
    pub max_distance: f32,
    /// Component-wise reciprocal of `direction` (±inf on zero components)
    inv_direction: Vec3,
}

impl Ray {
    /// Unbounded ray
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_max_distance(origin, direction, f32::INFINITY)
    }

    /// Ray limited to `t <= max_distance`
    pub fn with_max_distance(origin: Vec3, direction: Vec3, max_distance: f32) -> Self {
        Self {
            origin,
            direction,
            max_distance,
            inv_direction: direction.recip(),
        }
    }

    /// Slab test against an AABB.
    ///
    /// Returns the entry parameter (0 when the origin is inside the box),
    /// or `None` if the ray misses the box or reaches it past `max_distance`.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<f32> {
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let mut t_enter = 0.0f32;
        let mut t_exit = self.max_distance;

        for axis in 0..3 {
            // Parallel to this slab: either always inside or never
            if self.direction[axis] == 0.0 {
                if self.origin[axis] < aabb.min[axis] || self.origin[axis] > aabb.max[axis] {
                    return None;
                }
                continue;
            }
            t_enter = t_enter.max(t1[axis].min(t2[axis]));
            t_exit = t_exit.min(t1[axis].max(t2[axis]));
        }

        if t_enter <= t_exit { Some(t_enter) } else { None }
    }

    /// Whether the ray touches the AABB within `[0, max_distance]`
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.intersect_aabb(aabb).is_some()
    }
}

#[cfg(test)]
#[path = "ray_tests.rs"]
mod tests;
