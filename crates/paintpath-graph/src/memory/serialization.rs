//! Serialization methods for ResourceGraph.

use serde::{Deserialize, Serialize};

use super::super::{Node, NodeId};
use super::graph::ResourceGraph;
use crate::{GraphError, Result};

/// Flat, serde-friendly form of a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub root: NodeId,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<EdgeSnapshot>,
}

/// A single `dependency -> dependent` edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub dependency: NodeId,
    pub dependent: NodeId,
}

impl ResourceGraph {
    /// Capture nodes and edges in insertion order.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        let nodes = self.nodes().cloned().collect();
        let mut edges = Vec::with_capacity(self.edge_count());
        for dependency in self.nodes.keys() {
            for dependent in self.dependent_ids(dependency) {
                edges.push(EdgeSnapshot {
                    dependency: dependency.clone(),
                    dependent: dependent.clone(),
                });
            }
        }

        GraphSnapshot {
            root: self.root.clone(),
            nodes,
            edges,
        }
    }

    /// Rebuild a graph, validating that every referenced id exists.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self> {
        let GraphSnapshot { root, nodes, edges } = snapshot;

        let mut root_node = None;
        let mut rest = Vec::with_capacity(nodes.len());
        for node in nodes {
            if node.id == root && root_node.is_none() {
                root_node = Some(node);
            } else {
                rest.push(node);
            }
        }
        let root_node = root_node.ok_or(GraphError::MissingRoot(root))?;

        ResourceGraph::from_parts(
            root_node,
            rest,
            edges
                .into_iter()
                .map(|edge| (edge.dependency, edge.dependent)),
        )
    }

    /// Export the graph as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_snapshot())
            .map_err(|e| GraphError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: GraphSnapshot =
            serde_json::from_str(json).map_err(|e| GraphError::Serialization(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }
}
