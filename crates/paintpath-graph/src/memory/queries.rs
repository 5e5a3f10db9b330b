//! Query methods for ResourceGraph.

use super::super::{Node, NodeId};
use super::graph::ResourceGraph;

impl ResourceGraph {
    pub fn root(&self) -> &Node {
        // The root is inserted on construction and never removed.
        self.nodes[&self.root].as_ref()
    }

    pub fn root_id(&self) -> &NodeId {
        &self.root
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id).map(|node| &**node)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in insertion order, root first.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().map(|node| &**node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a graph holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.dependents.values().map(|set| set.len()).sum()
    }

    /// Ids of the nodes `id` waits on.
    pub fn dependency_ids<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a NodeId> + use<'a> {
        self.dependencies.get(id).into_iter().flatten()
    }

    /// Ids of the nodes waiting on `id`.
    pub fn dependent_ids<'a>(&'a self, id: &NodeId) -> impl Iterator<Item = &'a NodeId> + use<'a> {
        self.dependents.get(id).into_iter().flatten()
    }

    pub fn dependencies(&self, id: &NodeId) -> Vec<&Node> {
        self.dependency_ids(id)
            .filter_map(|dep| self.node(dep))
            .collect()
    }

    pub fn dependents(&self, id: &NodeId) -> Vec<&Node> {
        self.dependent_ids(id)
            .filter_map(|dep| self.node(dep))
            .collect()
    }
}
