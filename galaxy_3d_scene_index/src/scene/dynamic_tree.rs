/// DynamicTree - incremental bounding-volume hierarchy for scene queries.
///
/// A binary tree of AABBs kept up to date while objects are inserted,
/// moved and removed every frame (no rebuild). Leaves hold one object
/// each; internal nodes hold the union of their two children.
///
/// - **Insert**: surface-area-cost sibling search with branch-and-bound
///   pruning, then pairing with a new internal node.
/// - **Update**: the leaf is detached and reinserted, recycling its old
///   parent as the new pairing node (no allocation per move).
/// - **Rotation**: every node refitted on the way back to the root tries
///   one local subtree swap that shrinks its surface area.
///
/// Nodes live in a `DenseStore` keyed by `NodeId`. Relations between nodes
/// are `NodeId`s, never slot positions: the store compacts on removal and
/// may reallocate on growth.

use std::collections::VecDeque;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::utils::{DenseStore, DEFAULT_GROWTH_INCREMENT};
use crate::{engine_bail, engine_debug, engine_err, engine_trace};
use super::aabb::AABB;

const SOURCE: &str = "galaxy3d::DynamicTree";

/// Caller-supplied object identifier (stable across every tree mutation).
pub type ObjectKey = u64;

/// Stable handle of a tree node (its key in the node store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// Leaf or internal payload of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Holds one object's box
    Leaf {
        object: ObjectKey,
    },
    /// Holds the union of two subtrees
    Internal {
        child1: NodeId,
        child2: NodeId,
    },
}

/// A single node of the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeNode {
    /// Object box (leaf) or union of the children's boxes (internal)
    pub aabb: AABB,
    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

impl TreeNode {
    fn leaf(aabb: AABB, object: ObjectKey) -> Self {
        Self {
            aabb,
            parent: None,
            kind: NodeKind::Leaf { object },
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Object stored in a leaf
    pub fn object(&self) -> Option<ObjectKey> {
        match self.kind {
            NodeKind::Leaf { object } => Some(object),
            NodeKind::Internal { .. } => None,
        }
    }

    /// Both children of an internal node
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { child1, child2 } => Some((child1, child2)),
        }
    }
}

/// Descriptor for creating a DynamicTree
#[derive(Debug, Clone)]
pub struct DynamicTreeDesc {
    /// Node slots reserved up front
    pub initial_capacity: usize,
    /// Node slots added each time the store is full
    pub growth_increment: usize,
    /// Refit the ancestors of a removed (or moved) leaf.
    ///
    /// When `false`, ancestor boxes are left as they were after a removal:
    /// they still contain their subtree but may be looser than the union
    /// of their children until the next insert/update refits that path.
    pub refit_on_remove: bool,
}

impl Default for DynamicTreeDesc {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            growth_increment: DEFAULT_GROWTH_INCREMENT,
            refit_on_remove: true,
        }
    }
}

/// One local restructuring tried by `rotate`.
#[derive(Debug, Clone, Copy)]
enum Rotation {
    /// Sibling of N trades places with N.child1
    SiblingWithChild1,
    /// Sibling of N trades places with N.child2
    SiblingWithChild2,
    /// N trades places with sibling.child1
    NodeWithNephew1,
    /// N trades places with sibling.child2
    NodeWithNephew2,
}

/// Dynamic AABB tree.
///
/// Single-threaded: mutation takes `&mut self`, queries `&self`. Two trees
/// never share state, so a scene may keep one for static and one for
/// dynamic geometry.
pub struct DynamicTree {
    /// All nodes, leaf and internal
    nodes: DenseStore<NodeId, TreeNode>,
    /// Object key → its leaf
    leaves: FxHashMap<ObjectKey, NodeId>,
    /// `None` when the tree is empty
    root: Option<NodeId>,
    /// Next unused node handle
    next_node_id: u64,
    refit_on_remove: bool,
}

impl DynamicTree {
    /// Create an empty tree with default settings
    pub fn new() -> Self {
        Self::with_desc(DynamicTreeDesc::default())
    }

    /// Create an empty tree from a descriptor
    pub fn with_desc(desc: DynamicTreeDesc) -> Self {
        Self {
            nodes: DenseStore::with_capacity(desc.initial_capacity, desc.growth_increment),
            leaves: FxHashMap::default(),
            root: None,
            next_node_id: 0,
            refit_on_remove: desc.refit_on_remove,
        }
    }

    // ===== MUTATION =====

    /// Insert an object with its world-space AABB.
    ///
    /// # Errors
    ///
    /// - `DuplicateKey` if `key` is already in the tree
    /// - `InvalidAabb` if the box is inverted or non-finite
    ///
    /// The tree is left untouched on error.
    pub fn insert(&mut self, key: ObjectKey, aabb: &AABB) -> Result<()> {
        aabb.validate().map_err(|e| engine_err!(SOURCE, e))?;
        if self.leaves.contains_key(&key) {
            engine_bail!(SOURCE, Error::DuplicateKey(key));
        }

        let leaf = self.alloc_node(TreeNode::leaf(*aabb, key));
        self.leaves.insert(key, leaf);

        match self.find_best_sibling(aabb) {
            None => self.root = Some(leaf),
            Some(sibling) => {
                let pairing = self.alloc_node(TreeNode {
                    aabb: *aabb,
                    parent: None,
                    kind: NodeKind::Internal { child1: sibling, child2: leaf },
                });
                self.attach(pairing, sibling, leaf);
            }
        }

        Ok(())
    }

    /// Remove an object from the tree.
    ///
    /// The leaf's sibling takes its parent's place; the leaf and the parent
    /// are freed.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if `key` is not in the tree.
    pub fn remove(&mut self, key: ObjectKey) -> Result<()> {
        let Some(leaf) = self.leaves.remove(&key) else {
            engine_bail!(SOURCE, Error::KeyNotFound(key));
        };

        if let Some(parent) = self.detach_leaf(leaf) {
            self.nodes.remove(parent);
        }
        self.nodes.remove(leaf);

        Ok(())
    }

    /// Move an object to a new world-space AABB.
    ///
    /// # Errors
    ///
    /// - `KeyNotFound` if `key` is not in the tree
    /// - `InvalidAabb` if the box is inverted or non-finite
    pub fn update(&mut self, key: ObjectKey, aabb: &AABB) -> Result<()> {
        aabb.validate().map_err(|e| engine_err!(SOURCE, e))?;
        let Some(&leaf) = self.leaves.get(&key) else {
            engine_bail!(SOURCE, Error::KeyNotFound(key));
        };

        self.node_mut(leaf).aabb = *aabb;

        // Root leaf: nothing to re-link
        let Some(pairing) = self.detach_leaf(leaf) else {
            self.root = Some(leaf);
            return Ok(());
        };

        match self.find_best_sibling(aabb) {
            Some(sibling) => self.attach(pairing, sibling, leaf),
            None => {
                self.nodes.remove(pairing);
                self.root = Some(leaf);
            }
        }

        Ok(())
    }

    /// Remove every object and node
    pub fn clear(&mut self) {
        let count = self.leaves.len();
        self.nodes.clear();
        self.leaves.clear();
        self.root = None;
        engine_debug!(SOURCE, "Cleared {} objects", count);
    }

    // ===== ACCESSORS =====

    /// Number of objects in the tree
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the tree holds no object
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes (leaves + internal nodes)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether `key` is in the tree
    pub fn contains(&self, key: ObjectKey) -> bool {
        self.leaves.contains_key(&key)
    }

    /// Last box set for `key`
    pub fn aabb_of(&self, key: ObjectKey) -> Option<AABB> {
        self.leaves
            .get(&key)
            .and_then(|&leaf| self.nodes.get(leaf))
            .map(|node| node.aabb)
    }

    /// Every object key in the tree (order unspecified)
    pub fn keys(&self) -> impl Iterator<Item = ObjectKey> + '_ {
        self.leaves.keys().copied()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Box enclosing every object, `None` when empty
    pub fn root_aabb(&self) -> Option<AABB> {
        self.root.map(|root| self.node(root).aabb)
    }

    /// Node behind a handle
    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// Leaf node holding `key`
    pub fn leaf_of(&self, key: ObjectKey) -> Option<NodeId> {
        self.leaves.get(&key).copied()
    }

    /// Whether ancestors are refitted after removals
    pub fn refits_on_remove(&self) -> bool {
        self.refit_on_remove
    }

    // ===== INTERNAL: NODE STORAGE =====

    pub(crate) fn node(&self, id: NodeId) -> &TreeNode {
        match self.nodes.get(id) {
            Some(node) => node,
            None => unreachable!("dangling node handle {:?}", id),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TreeNode {
        match self.nodes.get_mut(id) {
            Some(node) => node,
            None => unreachable!("dangling node handle {:?}", id),
        }
    }

    fn alloc_node(&mut self, node: TreeNode) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// The other child of `parent`
    fn sibling_of(&self, parent: NodeId, child: NodeId) -> NodeId {
        match self.node(parent).kind {
            NodeKind::Internal { child1, child2 } => {
                if child1 == child { child2 } else { child1 }
            }
            NodeKind::Leaf { .. } => unreachable!("leaf {:?} used as a parent", parent),
        }
    }

    /// Put `new` in the place `old` occupies under `parent` (or at the root).
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                if let NodeKind::Internal { child1, child2 } = &mut self.node_mut(p).kind {
                    if *child1 == old {
                        *child1 = new;
                    } else {
                        debug_assert_eq!(*child2, old);
                        *child2 = new;
                    }
                }
            }
        }
        self.node_mut(new).parent = parent;
    }

    /// Set an internal node's box to the union of its children's boxes.
    ///
    /// Returns `true` if the box changed.
    fn refit(&mut self, id: NodeId) -> bool {
        let Some((child1, child2)) = self.node(id).children() else {
            return false;
        };
        let aabb = self.node(child1).aabb.union(&self.node(child2).aabb);
        let node = self.node_mut(id);
        let changed = node.aabb != aabb;
        node.aabb = aabb;
        changed
    }

    // ===== INTERNAL: INSERTION =====

    /// Branch-and-bound search for the node the new box should be paired with.
    ///
    /// Cost of pairing with candidate C:
    /// `SA(C ∪ box) + Σ_{ancestors A} (SA(A ∪ box) − SA(A))`.
    /// A subtree is explored only while its cheapest possible outcome
    /// (`SA(box)` plus the cost already inherited) can beat the best found.
    /// Returns `None` for an empty tree.
    pub(crate) fn find_best_sibling(&self, aabb: &AABB) -> Option<NodeId> {
        let root = self.root?;
        let root_node = self.node(root);
        let box_area = aabb.surface_area();

        let mut best = root;
        let mut best_cost = root_node.aabb.union(aabb).surface_area();

        let mut queue: VecDeque<(NodeId, f32)> = VecDeque::new();
        if let Some((child1, child2)) = root_node.children() {
            let inherited = best_cost - root_node.aabb.surface_area();
            queue.push_back((child1, inherited));
            queue.push_back((child2, inherited));
        }

        while let Some((id, inherited)) = queue.pop_front() {
            let node = self.node(id);
            let direct = node.aabb.union(aabb).surface_area();
            let cost = direct + inherited;
            if cost < best_cost {
                best_cost = cost;
                best = id;
            }

            if let Some((child1, child2)) = node.children() {
                let child_inherited = inherited + direct - node.aabb.surface_area();
                if box_area + child_inherited < best_cost {
                    queue.push_back((child1, child_inherited));
                    queue.push_back((child2, child_inherited));
                }
            }
        }

        Some(best)
    }

    /// Make `pairing` the parent of `sibling` and `leaf`, in `sibling`'s old
    /// place, then refit and rotate up to the root.
    fn attach(&mut self, pairing: NodeId, sibling: NodeId, leaf: NodeId) {
        let old_parent = self.node(sibling).parent;
        self.node_mut(pairing).kind = NodeKind::Internal { child1: sibling, child2: leaf };
        self.replace_child(old_parent, sibling, pairing);
        self.node_mut(sibling).parent = Some(pairing);
        self.node_mut(leaf).parent = Some(pairing);

        let mut current = Some(pairing);
        while let Some(id) = current {
            self.refit(id);
            let parent = self.node(id).parent;
            if parent.is_some() {
                self.rotate(id);
            }
            current = parent;
        }
    }

    // ===== INTERNAL: REMOVAL =====

    /// Unlink a leaf, splicing its sibling into the parent's place.
    ///
    /// Returns the parent node, now unreferenced (freed by `remove`,
    /// recycled by `update`), or `None` if the leaf was the root.
    fn detach_leaf(&mut self, leaf: NodeId) -> Option<NodeId> {
        let Some(parent) = self.node(leaf).parent else {
            self.root = None;
            return None;
        };

        let sibling = self.sibling_of(parent, leaf);
        let grandparent = self.node(parent).parent;
        self.replace_child(grandparent, parent, sibling);
        self.node_mut(leaf).parent = None;

        if self.refit_on_remove {
            self.refit_ancestors(grandparent);
        }

        Some(parent)
    }

    /// Refit from `start` upward, stopping once a box is unchanged.
    fn refit_ancestors(&mut self, start: Option<NodeId>) {
        let mut current = start;
        while let Some(id) = current {
            if !self.refit(id) {
                break;
            }
            current = self.node(id).parent;
        }
    }

    // ===== INTERNAL: ROTATION =====

    /// Try the swaps between `node`'s subtree and its sibling's subtree and
    /// apply the one that shrinks the restructured node the most, if any.
    ///
    /// Sibling↔child swaps are scored on `id`'s area, node↔nephew swaps on
    /// the sibling's (the only box each swap changes).
    fn rotate(&mut self, id: NodeId) {
        let node = *self.node(id);
        let (Some((child1, child2)), Some(parent)) = (node.children(), node.parent) else {
            return;
        };
        let sibling = self.sibling_of(parent, id);
        let sibling_node = *self.node(sibling);

        let c1 = self.node(child1).aabb;
        let c2 = self.node(child2).aabb;
        let s = sibling_node.aabb;
        let node_area = node.aabb.surface_area();

        let mut best: Option<(Rotation, f32)> = None;
        let mut consider = |rotation: Rotation, gain: f32| {
            if gain > 0.0 && best.map_or(true, |(_, best_gain)| gain > best_gain) {
                best = Some((rotation, gain));
            }
        };

        consider(Rotation::SiblingWithChild1, node_area - s.union(&c2).surface_area());
        consider(Rotation::SiblingWithChild2, node_area - c1.union(&s).surface_area());

        if let Some((nephew1, nephew2)) = sibling_node.children() {
            let n1 = self.node(nephew1).aabb;
            let n2 = self.node(nephew2).aabb;
            let sibling_area = s.surface_area();
            consider(Rotation::NodeWithNephew1, sibling_area - node.aabb.union(&n2).surface_area());
            consider(Rotation::NodeWithNephew2, sibling_area - n1.union(&node.aabb).surface_area());
        }

        let Some((rotation, gain)) = best else {
            return;
        };

        match rotation {
            Rotation::SiblingWithChild1 => {
                self.swap_subtrees(sibling, child1);
                self.refit(id);
            }
            Rotation::SiblingWithChild2 => {
                self.swap_subtrees(sibling, child2);
                self.refit(id);
            }
            Rotation::NodeWithNephew1 => {
                if let Some((nephew1, _)) = sibling_node.children() {
                    self.swap_subtrees(id, nephew1);
                    self.refit(sibling);
                }
            }
            Rotation::NodeWithNephew2 => {
                if let Some((_, nephew2)) = sibling_node.children() {
                    self.swap_subtrees(id, nephew2);
                    self.refit(sibling);
                }
            }
        }

        engine_trace!(SOURCE, "Rotation {:?} at {:?} (area -{})", rotation, id, gain);
    }

    /// Exchange the positions of two nodes with different parents,
    /// neither being an ancestor of the other.
    fn swap_subtrees(&mut self, a: NodeId, b: NodeId) {
        let parent_a = self.node(a).parent;
        let parent_b = self.node(b).parent;
        debug_assert_ne!(parent_a, parent_b);
        self.replace_child(parent_a, a, b);
        self.replace_child(parent_b, b, a);
    }
}

impl Default for DynamicTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "dynamic_tree_tests.rs"]
mod tests;
