//! Reachability traversal for ResourceGraph.

use rustc_hash::FxHashSet as HashSet;

use super::super::{Node, NodeId};
use super::graph::ResourceGraph;

impl ResourceGraph {
    /// Visit `start` and every node reachable through dependent edges,
    /// each exactly once.
    ///
    /// Only coverage is guaranteed; callers must not rely on the visiting
    /// order. Unknown start ids visit nothing.
    pub fn traverse<F>(&self, start: &NodeId, mut visit: F)
    where
        F: FnMut(&Node),
    {
        if !self.contains(start) {
            return;
        }

        let mut seen: HashSet<&NodeId> = HashSet::default();
        let mut stack = vec![start];
        seen.insert(start);

        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                visit(node);
            }
            for dependent in self.dependent_ids(id) {
                if seen.insert(dependent) {
                    stack.push(dependent);
                }
            }
        }
    }

    /// Ids of `start` and all of its transitive dependents.
    pub fn reachable_ids(&self, start: &NodeId) -> HashSet<NodeId> {
        let mut ids = HashSet::default();
        self.traverse(start, |node| {
            ids.insert(node.id.clone());
        });
        ids
    }
}
