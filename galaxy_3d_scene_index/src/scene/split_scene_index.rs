/// SplitSceneIndex - one DynamicTree for static geometry, one for movable
/// geometry.
///
/// Static objects never move, so keeping them in their own tree spares them
/// the refit/rotation work triggered by every dynamic update, and keeps
/// that tree's shape stable. Queries run against both trees.

use rustc_hash::FxHashMap;
use crate::camera::{Frustum, Ray};
use crate::error::{Error, Result};
use crate::{engine_bail, engine_info};
use super::aabb::AABB;
use super::dynamic_tree::{DynamicTree, DynamicTreeDesc, ObjectKey};
use super::scene_index::SceneIndex;

const SOURCE: &str = "galaxy3d::SplitSceneIndex";

/// Which tree an object lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mobility {
    Static,
    Dynamic,
}

pub struct SplitSceneIndex {
    static_tree: DynamicTree,
    dynamic_tree: DynamicTree,
    mobility: FxHashMap<ObjectKey, Mobility>,
}

impl SplitSceneIndex {
    pub fn new(static_desc: DynamicTreeDesc, dynamic_desc: DynamicTreeDesc) -> Self {
        engine_info!(
            SOURCE,
            "Created (static capacity {}, dynamic capacity {})",
            static_desc.initial_capacity,
            dynamic_desc.initial_capacity
        );
        Self {
            static_tree: DynamicTree::with_desc(static_desc),
            dynamic_tree: DynamicTree::with_desc(dynamic_desc),
            mobility: FxHashMap::default(),
        }
    }

    /// Insert an object into the tree matching its mobility.
    ///
    /// # Errors
    ///
    /// `DuplicateKey` if the key is present in either tree, `InvalidAabb`
    /// for a malformed box.
    pub fn insert(&mut self, key: ObjectKey, world_aabb: &AABB, mobility: Mobility) -> Result<()> {
        if self.mobility.contains_key(&key) {
            engine_bail!(SOURCE, Error::DuplicateKey(key));
        }
        self.tree_mut(mobility).insert(key, world_aabb)?;
        self.mobility.insert(key, mobility);
        Ok(())
    }

    /// Remove an object from whichever tree holds it.
    pub fn remove(&mut self, key: ObjectKey) -> Result<()> {
        let Some(mobility) = self.mobility.remove(&key) else {
            engine_bail!(SOURCE, Error::KeyNotFound(key));
        };
        self.tree_mut(mobility).remove(key)
    }

    /// Move an object within its tree.
    pub fn update(&mut self, key: ObjectKey, world_aabb: &AABB) -> Result<()> {
        let Some(&mobility) = self.mobility.get(&key) else {
            engine_bail!(SOURCE, Error::KeyNotFound(key));
        };
        self.tree_mut(mobility).update(key, world_aabb)
    }

    /// Move an object to the other tree (e.g. a prop that starts being simulated).
    pub fn set_mobility(&mut self, key: ObjectKey, mobility: Mobility) -> Result<()> {
        let Some(&current) = self.mobility.get(&key) else {
            engine_bail!(SOURCE, Error::KeyNotFound(key));
        };
        if current == mobility {
            return Ok(());
        }

        let Some(aabb) = self.tree(current).aabb_of(key) else {
            engine_bail!(SOURCE, Error::KeyNotFound(key));
        };
        self.tree_mut(current).remove(key)?;
        self.tree_mut(mobility).insert(key, &aabb)?;
        self.mobility.insert(key, mobility);
        Ok(())
    }

    /// Mobility of a stored object
    pub fn mobility_of(&self, key: ObjectKey) -> Option<Mobility> {
        self.mobility.get(&key).copied()
    }

    /// Total number of objects across both trees
    pub fn len(&self) -> usize {
        self.mobility.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mobility.is_empty()
    }

    pub fn tree(&self, mobility: Mobility) -> &DynamicTree {
        match mobility {
            Mobility::Static => &self.static_tree,
            Mobility::Dynamic => &self.dynamic_tree,
        }
    }

    fn tree_mut(&mut self, mobility: Mobility) -> &mut DynamicTree {
        match mobility {
            Mobility::Static => &mut self.static_tree,
            Mobility::Dynamic => &mut self.dynamic_tree,
        }
    }

    pub fn query_frustum(&self, frustum: &Frustum, results: &mut Vec<ObjectKey>) {
        SceneIndex::query_frustum(&self.static_tree, frustum, results);
        SceneIndex::query_frustum(&self.dynamic_tree, frustum, results);
    }

    pub fn query_ray(&self, ray: &Ray, results: &mut Vec<ObjectKey>) {
        SceneIndex::query_ray(&self.static_tree, ray, results);
        SceneIndex::query_ray(&self.dynamic_tree, ray, results);
    }

    pub fn clear(&mut self) {
        self.static_tree.clear();
        self.dynamic_tree.clear();
        self.mobility.clear();
    }
}

impl Default for SplitSceneIndex {
    fn default() -> Self {
        Self::new(DynamicTreeDesc::default(), DynamicTreeDesc::default())
    }
}

#[cfg(test)]
#[path = "split_scene_index_tests.rs"]
mod tests;
