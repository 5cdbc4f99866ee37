//! Scene spatial indexing
//!
//! Provides the dynamic AABB tree used for render culling and picking,
//! the SceneIndex seam the scene subsystem talks to, and a static/dynamic
//! split built from two independent trees.

mod aabb;
mod dynamic_tree;
mod dynamic_tree_query;
mod dynamic_tree_validation;
mod scene_index;
mod split_scene_index;

pub use aabb::AABB;
pub use dynamic_tree::{
    DynamicTree, DynamicTreeDesc, NodeId, NodeKind, ObjectKey, TreeNode,
};
pub use scene_index::SceneIndex;
pub use split_scene_index::{Mobility, SplitSceneIndex};
