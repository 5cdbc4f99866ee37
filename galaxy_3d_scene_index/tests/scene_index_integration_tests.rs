//! Integration tests for the scene spatial index
//!
//! These tests drive the public API the way the scene subsystem does:
//! objects appear, move and disappear, and each frame asks for the objects
//! inside the camera frustum and under the picking ray.
//!
//! Run with: cargo test --test scene_index_integration_tests

use galaxy_3d_scene_index::galaxy3d::camera::{Frustum, Ray};
use galaxy_3d_scene_index::galaxy3d::scene::{
    DynamicTree, DynamicTreeDesc, Mobility, ObjectKey, SceneIndex, SplitSceneIndex, AABB,
};
use galaxy_3d_scene_index::galaxy3d::Error;
use galaxy_3d_scene_index::glam::{Mat4, Vec3};

// ============================================================================
// HELPERS
// ============================================================================

fn cube_at(center: Vec3, half: f32) -> AABB {
    AABB::from_center_half_extents(center, Vec3::splat(half))
}

fn sorted(mut keys: Vec<ObjectKey>) -> Vec<ObjectKey> {
    keys.sort_unstable();
    keys.dedup();
    keys
}

/// Camera at +Z looking at the origin, seeing [-500, 500]^3
fn overview_frustum() -> Frustum {
    let proj = Mat4::orthographic_rh(-500.0, 500.0, -500.0, 500.0, 0.0, 1000.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 500.0), Vec3::ZERO, Vec3::Y);
    Frustum::from_view_projection(&(proj * view))
}

/// Perspective camera at the origin looking down -Z
fn forward_frustum() -> Frustum {
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
    Frustum::from_view_projection(&(proj * view))
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_integration_single_object() {
    let mut tree = DynamicTree::new();
    tree.insert(1, &AABB::new(Vec3::ZERO, Vec3::ONE)).unwrap();

    assert_eq!(tree.node_count(), 1);
    let root = tree.get_node(tree.root().unwrap()).unwrap();
    assert!(root.is_leaf());
    assert_eq!(root.object(), Some(1));
}

#[test]
fn test_integration_two_objects_root_bounds_both() {
    let mut tree = DynamicTree::new();
    let a = AABB::new(Vec3::ZERO, Vec3::ONE);
    let b = AABB::new(Vec3::splat(5.0), Vec3::splat(6.0));
    tree.insert(1, &a).unwrap();
    tree.insert(2, &b).unwrap();

    assert_eq!(tree.node_count(), 3);
    assert_eq!(tree.root_aabb(), Some(a.union(&b)));
}

#[test]
fn test_integration_remove_middle_object() {
    let mut tree = DynamicTree::new();
    tree.insert(1, &cube_at(Vec3::new(-5.0, 0.0, 0.0), 1.0)).unwrap();
    tree.insert(2, &cube_at(Vec3::ZERO, 1.0)).unwrap();
    tree.insert(3, &cube_at(Vec3::new(5.0, 0.0, 0.0), 1.0)).unwrap();

    tree.remove(2).unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.node_count(), 3);
    tree.assert_well_formed();
}

#[test]
fn test_integration_move_object_across_scene() {
    let mut tree = DynamicTree::new();
    let b = AABB::new(Vec3::splat(100.0), Vec3::splat(101.0));
    tree.insert(1, &AABB::new(Vec3::splat(-100.0), Vec3::splat(-99.0))).unwrap();
    tree.insert(2, &b).unwrap();

    let moved = AABB::new(Vec3::new(98.0, 100.0, 100.0), Vec3::new(99.0, 101.0, 101.0));
    tree.update(1, &moved).unwrap();

    let root = tree.root_aabb().unwrap();
    assert!(root.contains(&moved) && root.contains(&b));
    tree.assert_well_formed();
}

#[test]
fn test_integration_ray_picks_crossed_object() {
    let mut tree = DynamicTree::new();
    tree.insert(1, &cube_at(Vec3::new(0.0, 0.0, -10.0), 1.0)).unwrap();
    tree.insert(2, &cube_at(Vec3::new(30.0, 0.0, -10.0), 1.0)).unwrap();

    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
    let hits: Vec<ObjectKey> = tree.collect_ray_intersections(&ray).into_iter().collect();
    assert_eq!(hits, vec![1]);
}

#[test]
fn test_integration_frustum_sees_whole_scene() {
    let mut tree = DynamicTree::new();
    for key in 0..100u64 {
        let x = (key % 10) as f32 * 40.0 - 200.0;
        let y = (key / 10) as f32 * 40.0 - 200.0;
        tree.insert(key, &cube_at(Vec3::new(x, y, 0.0), 5.0)).unwrap();
    }

    let visible = tree.collect_frustum_intersections(&overview_frustum());
    assert_eq!(visible.len(), 100);
}

// ============================================================================
// FRAME LOOP THROUGH THE SceneIndex TRAIT
// ============================================================================

#[test]
fn test_integration_scene_index_trait_object() {
    let mut index: Box<dyn SceneIndex> = Box::new(DynamicTree::new());
    index.insert(1, &cube_at(Vec3::new(0.0, 0.0, -20.0), 1.0)).unwrap();
    index.insert(2, &cube_at(Vec3::new(0.0, 0.0, 20.0), 1.0)).unwrap();

    let mut visible = Vec::new();
    index.query_frustum(&forward_frustum(), &mut visible);
    assert_eq!(visible, vec![1]);

    // Object 2 walks in front of the camera
    index.update(2, &cube_at(Vec3::new(3.0, 0.0, -30.0), 1.0)).unwrap();
    visible.clear();
    index.query_frustum(&forward_frustum(), &mut visible);
    assert_eq!(sorted(visible.clone()), vec![1, 2]);

    let mut picked = Vec::new();
    index.query_ray(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)), &mut picked);
    assert_eq!(picked, vec![1]);

    index.remove(1).unwrap();
    assert_eq!(index.remove(1), Err(Error::KeyNotFound(1)));

    index.clear();
    visible.clear();
    index.query_frustum(&forward_frustum(), &mut visible);
    assert!(visible.is_empty());
}

#[test]
fn test_integration_many_frames_of_moving_objects() {
    let mut tree = DynamicTree::new();
    for key in 0..200u64 {
        let angle = key as f32 * 0.1;
        tree.insert(key, &cube_at(Vec3::new(angle.cos() * 50.0, angle.sin() * 50.0, -60.0), 1.0)).unwrap();
    }

    for frame in 0..30 {
        let t = frame as f32 * 0.05;
        for key in (0..200u64).filter(|k| k % 3 == 0) {
            let angle = key as f32 * 0.1 + t;
            tree.update(key, &cube_at(Vec3::new(angle.cos() * 50.0, angle.sin() * 50.0, -60.0), 1.0)).unwrap();
        }
        tree.assert_well_formed();
        assert_eq!(tree.len(), 200);
    }

    // Everything orbits in front of the overview camera
    assert_eq!(tree.collect_frustum_intersections(&overview_frustum()).len(), 200);
}

#[test]
fn test_integration_split_index_frame() {
    let mut index = SplitSceneIndex::new(
        DynamicTreeDesc { initial_capacity: 1024, ..DynamicTreeDesc::default() },
        DynamicTreeDesc::default(),
    );

    // Level geometry
    for key in 0..50u64 {
        index.insert(key, &cube_at(Vec3::new(key as f32 * 4.0 - 100.0, -10.0, -50.0), 2.0), Mobility::Static).unwrap();
    }
    // Actors
    for key in 100..110u64 {
        index.insert(key, &cube_at(Vec3::new(0.0, 0.0, -(key as f32 - 95.0)), 0.5), Mobility::Dynamic).unwrap();
    }
    assert_eq!(index.len(), 60);

    let mut visible = Vec::new();
    index.query_frustum(&overview_frustum(), &mut visible);
    assert_eq!(visible.len(), 60);

    // Ray down the -Z axis hits every actor and no level block
    let mut picked = Vec::new();
    index.query_ray(&Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0)), &mut picked);
    assert_eq!(sorted(picked), (100..110u64).collect::<Vec<_>>());

    index.set_mobility(100, Mobility::Static).unwrap();
    assert_eq!(index.tree(Mobility::Static).len(), 51);
    index.tree(Mobility::Static).assert_well_formed();
    index.tree(Mobility::Dynamic).assert_well_formed();
}
