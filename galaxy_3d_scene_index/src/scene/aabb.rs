/// Axis-aligned bounding boxes for the spatial index.

use glam::Vec3;
use crate::error::{Error, Result};

/// Axis-Aligned Bounding Box in world space
///
/// Leaves of the dynamic tree store the box set by the caller; internal
/// nodes store the union of their two children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with half-size `half_extents`
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest box enclosing both `self` and `other`
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Total area of the six faces.
    ///
    /// This is the cost metric of the tree: the probability that a random
    /// ray or frustum touches a box is roughly proportional to its area.
    pub fn surface_area(&self) -> f32 {
        let d = self.max - self.min;
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }

    /// Test if this AABB fully contains another AABB.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// Test if this AABB intersects (overlaps) another AABB.
    ///
    /// Returns `true` if the two AABBs overlap or touch.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Reject boxes the tree cannot reason about.
    ///
    /// Degenerate (flat or point) boxes are accepted; inverted boxes and
    /// NaN/infinite coordinates are not.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidAabb(format!(
                "non-finite corners min={} max={}", self.min, self.max
            )));
        }
        if self.min.cmpgt(self.max).any() {
            return Err(Error::InvalidAabb(format!(
                "inverted corners min={} max={}", self.min, self.max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
