//! Filtered cloning for ResourceGraph.

use std::sync::Arc;

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use super::super::{Node, NodeId};
use super::graph::{NodeMap, ResourceGraph};

impl ResourceGraph {
    /// Clone the part of the graph reachable from the root, keeping only the
    /// nodes for which `keep` returns true.
    ///
    /// The root is always kept. Dropped nodes are elided: each kept node is
    /// linked to its nearest kept descendants, so relative ordering between
    /// kept nodes survives. The returned graph shares no mutable state with
    /// `self`.
    pub fn clone_with_relationships<P>(&self, keep: P) -> ResourceGraph
    where
        P: Fn(&Node) -> bool,
    {
        let reachable = self.reachable_ids(&self.root);
        let kept: Vec<&NodeId> = self
            .nodes
            .values()
            .filter(|node| reachable.contains(&node.id))
            .filter(|node| node.id == self.root || keep(&***node))
            .map(|node| &node.id)
            .collect();
        let kept_set: HashSet<&NodeId> = kept.iter().copied().collect();

        let mut nodes = NodeMap::default();
        for id in &kept {
            nodes.insert((*id).clone(), Arc::clone(&self.nodes[*id]));
        }

        let mut clone = ResourceGraph {
            root: self.root.clone(),
            nodes,
            dependencies: HashMap::default(),
            dependents: HashMap::default(),
        };

        for id in &kept {
            for dependent in self.nearest_kept_dependents(id, &kept_set) {
                clone.link(id, dependent);
            }
        }

        tracing::trace!(
            kept = clone.len(),
            dropped = reachable.len() - clone.len(),
            "cloned resource graph"
        );

        clone
    }

    /// Closest descendants of `id` that are in `kept`, looking through
    /// dropped nodes.
    fn nearest_kept_dependents<'a>(
        &'a self,
        id: &NodeId,
        kept: &HashSet<&NodeId>,
    ) -> Vec<&'a NodeId> {
        let mut found = Vec::new();
        let mut seen: HashSet<&NodeId> = HashSet::default();
        let mut stack: Vec<&NodeId> = self.dependent_ids(id).collect();

        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                continue;
            }
            if kept.contains(next) {
                found.push(next);
            } else {
                stack.extend(self.dependent_ids(next));
            }
        }

        found
    }

    fn link(&mut self, dependency: &NodeId, dependent: &NodeId) {
        self.dependents
            .entry(dependency.clone())
            .or_default()
            .insert(dependent.clone());
        self.dependencies
            .entry(dependent.clone())
            .or_default()
            .insert(dependency.clone());
    }
}
