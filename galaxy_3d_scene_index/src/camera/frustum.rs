/// Frustum - six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes

use glam::{Mat4, Vec3, Vec4};
use crate::scene::AABB;

/// Result of a 3-way frustum/AABB classification.
///
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect every leaf of the subtree without further testing
/// - `Partial` → keep testing children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB partially overlaps the frustum
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes for culling.
///
/// Normal (A, B, C) points inward (toward the visible volume).
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Build a frustum from already-extracted planes (normalized, inward normals).
    pub fn from_planes(planes: [Vec4; 6]) -> Self {
        Self { planes }
    }

    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Gribb & Hartmann method, with each plane normalized so that
    /// (A, B, C) is a unit vector.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let mut planes = [Vec4::ZERO; 6];
        planes[PLANE_LEFT] = row3 + row0;
        planes[PLANE_RIGHT] = row3 - row0;
        planes[PLANE_BOTTOM] = row3 + row1;
        planes[PLANE_TOP] = row3 - row1;
        planes[PLANE_NEAR] = row3 + row2;
        planes[PLANE_FAR] = row3 - row2;

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// Conservative: may return false positives near frustum corners,
    /// never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes
            .iter()
            .all(|plane| signed_distance(plane, positive_vertex(plane, aabb)) >= 0.0)
    }

    /// Classify an AABB against the frustum (3-way test).
    ///
    /// - p-vertex outside any plane → `Outside` (early out)
    /// - n-vertex outside any plane → at least `Partial`
    /// - otherwise → `Inside`
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            if signed_distance(plane, positive_vertex(plane, aabb)) < 0.0 {
                return FrustumTest::Outside;
            }
            if signed_distance(plane, negative_vertex(plane, aabb)) < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }
}

fn signed_distance(plane: &Vec4, point: Vec3) -> f32 {
    plane.truncate().dot(point) + plane.w
}

/// AABB corner furthest along the plane normal
fn positive_vertex(plane: &Vec4, aabb: &AABB) -> Vec3 {
    Vec3::new(
        if plane.x >= 0.0 { aabb.max.x } else { aabb.min.x },
        if plane.y >= 0.0 { aabb.max.y } else { aabb.min.y },
        if plane.z >= 0.0 { aabb.max.z } else { aabb.min.z },
    )
}

/// AABB corner furthest against the plane normal
fn negative_vertex(plane: &Vec4, aabb: &AABB) -> Vec3 {
    Vec3::new(
        if plane.x >= 0.0 { aabb.min.x } else { aabb.max.x },
        if plane.y >= 0.0 { aabb.min.y } else { aabb.max.y },
        if plane.z >= 0.0 { aabb.min.z } else { aabb.max.z },
    )
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
