use glam::Vec3;
use crate::scene::AABB;
use super::*;

fn unit_box_at(center: Vec3) -> AABB {
    AABB::from_center_half_extents(center, Vec3::splat(0.5))
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_ray_is_unbounded() {
    let ray = Ray::new(Vec3::ZERO, Vec3::X);
    assert_eq!(ray.max_distance, f32::INFINITY);
    assert_eq!(ray.direction, Vec3::X);
}

// ============================================================================
// Slab test
// ============================================================================

#[test]
fn test_ray_hits_box_in_front() {
    let ray = Ray::new(Vec3::ZERO, Vec3::X);
    let hit = ray.intersect_aabb(&unit_box_at(Vec3::new(5.0, 0.0, 0.0)));
    assert_eq!(hit, Some(4.5));
}

#[test]
fn test_ray_misses_box_behind() {
    let ray = Ray::new(Vec3::ZERO, Vec3::X);
    assert!(!ray.intersects_aabb(&unit_box_at(Vec3::new(-5.0, 0.0, 0.0))));
}

#[test]
fn test_ray_misses_box_to_the_side() {
    let ray = Ray::new(Vec3::ZERO, Vec3::X);
    assert!(!ray.intersects_aabb(&unit_box_at(Vec3::new(5.0, 3.0, 0.0))));
}

#[test]
fn test_ray_origin_inside_box() {
    let ray = Ray::new(Vec3::new(0.1, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(ray.intersect_aabb(&unit_box_at(Vec3::ZERO)), Some(0.0));
}

#[test]
fn test_ray_on_slab_boundary_with_zero_component() {
    // Direction has zero Y/Z; origin lies exactly on the box's min.y face
    let ray = Ray::new(Vec3::new(-10.0, -0.5, 0.0), Vec3::X);
    assert!(ray.intersects_aabb(&unit_box_at(Vec3::ZERO)));
}

#[test]
fn test_ray_diagonal_hit() {
    let ray = Ray::new(Vec3::ZERO, Vec3::ONE);
    assert!(ray.intersects_aabb(&unit_box_at(Vec3::splat(4.0))));
    assert!(!ray.intersects_aabb(&unit_box_at(Vec3::new(4.0, -4.0, 4.0))));
}

#[test]
fn test_ray_max_distance_limits_hits() {
    let ray = Ray::with_max_distance(Vec3::ZERO, Vec3::X, 3.0);
    assert!(ray.intersects_aabb(&unit_box_at(Vec3::new(3.0, 0.0, 0.0))));
    assert!(!ray.intersects_aabb(&unit_box_at(Vec3::new(5.0, 0.0, 0.0))));
}
