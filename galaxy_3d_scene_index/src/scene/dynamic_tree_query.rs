/// Read-only traversals of the DynamicTree: ray picking, frustum culling
/// and box overlap.
///
/// All traversals are iterative (explicit work-queue seeded with the root)
/// so stack usage stays flat however deep the tree gets. A node whose box
/// fails the test prunes its whole subtree.

use std::collections::VecDeque;
use std::iter;
use rustc_hash::FxHashSet;
use crate::camera::{Frustum, FrustumTest, Ray};
use super::aabb::AABB;
use super::dynamic_tree::{DynamicTree, NodeId, NodeKind, ObjectKey};

impl DynamicTree {
    /// Objects whose box is hit by the ray (candidates for exact picking).
    pub fn collect_ray_intersections(&self, ray: &Ray) -> FxHashSet<ObjectKey> {
        let mut results = FxHashSet::default();
        self.visit_ray(ray, &mut results);
        results
    }

    /// Objects whose box intersects the frustum (candidates for drawing).
    pub fn collect_frustum_intersections(&self, frustum: &Frustum) -> FxHashSet<ObjectKey> {
        let mut results = FxHashSet::default();
        self.visit_frustum(frustum, &mut results);
        results
    }

    /// Objects whose box overlaps `aabb`.
    pub fn collect_aabb_intersections(&self, aabb: &AABB) -> FxHashSet<ObjectKey> {
        let mut results = FxHashSet::default();
        self.visit_overlapping(|node_aabb| node_aabb.intersects(aabb), &mut results);
        results
    }

    pub(crate) fn visit_ray<E: Extend<ObjectKey>>(&self, ray: &Ray, results: &mut E) {
        self.visit_overlapping(|node_aabb| ray.intersects_aabb(node_aabb), results);
    }

    /// Frustum traversal with 3-way classification: once a node is fully
    /// inside, its whole subtree is collected without further plane tests.
    pub(crate) fn visit_frustum<E: Extend<ObjectKey>>(&self, frustum: &Frustum, results: &mut E) {
        let Some(root) = self.root() else {
            return;
        };

        let mut queue: VecDeque<(NodeId, bool)> = VecDeque::new();
        queue.push_back((root, false));

        while let Some((id, parent_inside)) = queue.pop_front() {
            let node = self.node(id);
            let inside = parent_inside || match frustum.classify_aabb(&node.aabb) {
                FrustumTest::Outside => continue,
                FrustumTest::Inside => true,
                FrustumTest::Partial => false,
            };

            match node.kind {
                NodeKind::Leaf { object } => results.extend(iter::once(object)),
                NodeKind::Internal { child1, child2 } => {
                    queue.push_back((child1, inside));
                    queue.push_back((child2, inside));
                }
            }
        }
    }

    fn visit_overlapping<F, E>(&self, test: F, results: &mut E)
    where
        F: Fn(&AABB) -> bool,
        E: Extend<ObjectKey>,
    {
        let Some(root) = self.root() else {
            return;
        };

        let mut queue: VecDeque<NodeId> = VecDeque::new();
        queue.push_back(root);

        while let Some(id) = queue.pop_front() {
            let node = self.node(id);
            if !test(&node.aabb) {
                continue;
            }

            match node.kind {
                NodeKind::Leaf { object } => results.extend(iter::once(object)),
                NodeKind::Internal { child1, child2 } => {
                    queue.push_back(child1);
                    queue.push_back(child2);
                }
            }
        }
    }
}
