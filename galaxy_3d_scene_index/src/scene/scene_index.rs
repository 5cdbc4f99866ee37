/// Spatial acceleration structures for scene queries.
///
/// A SceneIndex indexes scene objects by their world-space AABB for render
/// culling (frustum) and picking (ray). The scene subsystem feeds it from
/// its change notifications: an object becoming active inserts, a transform
/// or shape change updates, a deactivation removes.
///
/// Ownership: the caller creates and owns the SceneIndex.

use crate::camera::{Frustum, Ray};
use crate::error::Result;
use super::aabb::AABB;
use super::dynamic_tree::{DynamicTree, ObjectKey};

/// Trait for spatial indexing of scene objects.
pub trait SceneIndex: Send + Sync {
    /// Insert an object with its world-space AABB.
    fn insert(&mut self, key: ObjectKey, world_aabb: &AABB) -> Result<()>;

    /// Remove an object from the index.
    fn remove(&mut self, key: ObjectKey) -> Result<()>;

    /// Update an object's world-space AABB (e.g. after transform change).
    fn update(&mut self, key: ObjectKey, world_aabb: &AABB) -> Result<()>;

    /// Query all objects whose world AABB intersects the frustum.
    /// Results are appended to `results`.
    fn query_frustum(&self, frustum: &Frustum, results: &mut Vec<ObjectKey>);

    /// Query all objects whose world AABB is hit by the ray.
    /// Results are appended to `results`.
    fn query_ray(&self, ray: &Ray, results: &mut Vec<ObjectKey>);

    /// Remove all objects from the index.
    fn clear(&mut self);
}

impl SceneIndex for DynamicTree {
    fn insert(&mut self, key: ObjectKey, world_aabb: &AABB) -> Result<()> {
        DynamicTree::insert(self, key, world_aabb)
    }

    fn remove(&mut self, key: ObjectKey) -> Result<()> {
        DynamicTree::remove(self, key)
    }

    fn update(&mut self, key: ObjectKey, world_aabb: &AABB) -> Result<()> {
        DynamicTree::update(self, key, world_aabb)
    }

    fn query_frustum(&self, frustum: &Frustum, results: &mut Vec<ObjectKey>) {
        self.visit_frustum(frustum, results);
    }

    fn query_ray(&self, ray: &Ray, results: &mut Vec<ObjectKey>) {
        self.visit_ray(ray, results);
    }

    fn clear(&mut self) {
        DynamicTree::clear(self);
    }
}
