//! Query volumes - the ray and frustum shapes the scene index is queried with.
//!
//! Both are passive values built by the caller (picking, render culling)
//! and tested against AABBs during tree traversal.

mod frustum;
mod ray;

pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use ray::Ray;
