//! Mutation methods for ResourceGraph.

use std::sync::Arc;

use super::super::{Node, NodeId};
use super::graph::ResourceGraph;
use crate::{GraphError, Result};

impl ResourceGraph {
    /// Add a node without any edges.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), Arc::new(node));
        Ok(())
    }

    /// Record that `dependent` cannot start before `dependency` finishes.
    ///
    /// Both nodes must already be in the graph. The root never gains a
    /// dependency. Acyclicity is the caller's responsibility.
    pub fn add_dependency(&mut self, dependent: &NodeId, dependency: &NodeId) -> Result<()> {
        for id in [dependent, dependency] {
            if !self.nodes.contains_key(id) {
                return Err(GraphError::UnknownNode(id.clone()));
            }
        }
        if dependent == dependency {
            return Err(GraphError::SelfDependency(dependent.clone()));
        }
        if *dependent == self.root {
            return Err(GraphError::RootDependency(dependency.clone()));
        }

        // Forward and reverse edges (sets prevent duplicates)
        self.dependents
            .entry(dependency.clone())
            .or_default()
            .insert(dependent.clone());
        self.dependencies
            .entry(dependent.clone())
            .or_default()
            .insert(dependency.clone());

        Ok(())
    }

    /// Attach a new node as a dependent of the root and return its id.
    pub fn add_dependent(&mut self, node: Node) -> Result<NodeId> {
        let id = node.id.clone();
        let root = self.root.clone();
        self.add_node(node)?;
        self.add_dependency(&id, &root)?;
        Ok(id)
    }
}
