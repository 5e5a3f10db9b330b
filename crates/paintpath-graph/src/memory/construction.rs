//! Construction methods for ResourceGraph.

use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;

use super::super::{Node, NodeId};
use super::graph::{NodeMap, ResourceGraph};
use crate::Result;

impl ResourceGraph {
    /// Create a graph containing only `root`.
    pub fn new(root: Node) -> Self {
        let root_id = root.id.clone();
        let mut nodes = NodeMap::default();
        nodes.insert(root_id.clone(), Arc::new(root));

        Self {
            root: root_id,
            nodes,
            dependencies: HashMap::default(),
            dependents: HashMap::default(),
        }
    }

    /// Construct a graph from a root, the remaining nodes, and
    /// `(dependency, dependent)` edge pairs.
    pub fn from_parts<I, E>(root: Node, nodes: I, edges: E) -> Result<Self>
    where
        I: IntoIterator<Item = Node>,
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut graph = Self::new(root);
        for node in nodes {
            graph.add_node(node)?;
        }
        for (dependency, dependent) in edges {
            graph.add_dependency(&dependent, &dependency)?;
        }
        Ok(graph)
    }
}
