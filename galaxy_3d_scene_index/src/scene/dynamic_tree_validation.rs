/// Debugging helpers for the DynamicTree: structural checks, depth and
/// internal-box enumeration (wireframe overlays).

use rustc_hash::FxHashSet;
use super::aabb::AABB;
use super::dynamic_tree::{DynamicTree, NodeId, NodeKind, ObjectKey};

impl DynamicTree {
    /// Boxes of every internal node, for debug wireframe drawing.
    pub fn internal_node_aabbs(&self) -> Vec<AABB> {
        let mut boxes = Vec::new();
        let mut stack: Vec<NodeId> = self.root().into_iter().collect();
        while let Some(id) = stack.pop() {
            if let Some((child1, child2)) = self.node(id).children() {
                boxes.push(self.node(id).aabb);
                stack.push(child1);
                stack.push(child2);
            }
        }
        boxes
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root().map(|r| (r, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some((child1, child2)) = self.node(id).children() {
                stack.push((child1, depth + 1));
                stack.push((child2, depth + 1));
            }
        }
        height
    }

    /// Sum of the surface areas of all internal nodes (the tree's query cost).
    pub fn internal_area(&self) -> f32 {
        self.internal_node_aabbs().iter().map(AABB::surface_area).sum()
    }

    /// Panics if the tree isn't well-formed.
    ///
    /// Checks, for every node reachable from the root:
    /// - parent/child links agree and no node is reached twice
    /// - internal nodes have exactly two children
    /// - internal boxes equal the union of their children (only contain
    ///   them when removals skip the refit)
    /// - each leaf is the one registered for its object key
    ///
    /// and that no node is unreachable.
    pub fn assert_well_formed(&self) {
        let Some(root) = self.root() else {
            assert_eq!(self.node_count(), 0, "empty tree still owns nodes");
            assert_eq!(self.len(), 0, "empty tree still maps objects");
            return;
        };
        assert!(self.node(root).parent.is_none(), "root has a parent");

        let mut visited: FxHashSet<NodeId> = FxHashSet::default();
        let mut objects: FxHashSet<ObjectKey> = FxHashSet::default();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            assert!(visited.insert(id), "node {:?} reached twice", id);
            let node = self.node(id);

            match node.kind {
                NodeKind::Leaf { object } => {
                    assert_eq!(self.leaf_of(object), Some(id), "leaf of object {} is not registered", object);
                    assert!(objects.insert(object), "object {} stored twice", object);
                }
                NodeKind::Internal { child1, child2 } => {
                    assert_ne!(child1, child2, "node {:?} has the same child twice", id);
                    let a = self.node(child1);
                    let b = self.node(child2);
                    assert_eq!(a.parent, Some(id), "child {:?} does not point back to {:?}", child1, id);
                    assert_eq!(b.parent, Some(id), "child {:?} does not point back to {:?}", child2, id);

                    let union = a.aabb.union(&b.aabb);
                    if self.refits_on_remove() {
                        assert_eq!(node.aabb, union, "node {:?} box is not the union of its children", id);
                    } else {
                        assert!(node.aabb.contains(&union), "node {:?} does not contain its children", id);
                    }

                    stack.push(child1);
                    stack.push(child2);
                }
            }
        }

        assert_eq!(visited.len(), self.node_count(), "unreachable nodes in the store");
        assert_eq!(objects.len(), self.len(), "objects mapped to unreachable leaves");
        assert_eq!(self.node_count(), 2 * self.len() - 1, "tree is not a full binary tree");
    }
}
