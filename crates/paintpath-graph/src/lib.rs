//! # paintpath-graph
//!
//! Resource-loading dependency graphs for page-load simulation.
//!
//! A [`ResourceGraph`] is a rooted DAG whose nodes are either network fetches
//! or blocks of main-thread CPU work. Edges run from a dependency to the tasks
//! that cannot start until it finishes. The root is the top-level document
//! request.
//!
//! The crate only provides what a first-paint savings estimator needs:
//!
//! - **Traversal**: every node reachable from a start node, each visited once
//! - **Filtered cloning**: an independent copy keeping a subset of nodes while
//!   preserving the relative dependency structure between them
//! - **Root attachment**: re-inject synthetic work as a dependent of the root
//! - **URL lookup**: map a request URL back to the node that fetched it
//!
//! ## Quick Start
//!
//! ```rust
//! use paintpath_graph::{NetworkRecord, Node, NodeIndex, ResourceGraph, ResourceType};
//!
//! # fn main() -> paintpath_graph::Result<()> {
//! let document = Node::network(
//!     "1",
//!     NetworkRecord::new("https://example.com/", ResourceType::Document).with_transfer_size(12_000),
//! );
//! let stylesheet = Node::network(
//!     "2",
//!     NetworkRecord::new("https://example.com/app.css", ResourceType::Stylesheet)
//!         .with_transfer_size(20_000),
//! );
//!
//! let mut graph = ResourceGraph::new(document);
//! graph.add_node(stylesheet)?;
//! graph.add_dependency(&"2".into(), &"1".into())?;
//!
//! let index = NodeIndex::from_nodes(graph.nodes());
//! let css = index.get("https://example.com/app.css").unwrap();
//! assert_eq!(graph.reachable_ids(css).len(), 1);
//!
//! let without_css = graph.clone_with_relationships(|node| !node.is_stylesheet());
//! assert_eq!(without_css.len(), 1);
//! assert_eq!(graph.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod lookup;
pub mod node;
pub mod node_id;

mod memory;

pub use lookup::NodeIndex;
pub use memory::{EdgeSnapshot, GraphSnapshot, ResourceGraph};
pub use node::{CpuEvent, NetworkRecord, Node, NodeKind, NodeType, ResourceType, TraceEvent};
pub use node_id::NodeId;

/// Error types for graph construction and mutation.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A node with this id is already in the graph.
    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),

    /// An edge referenced a node that is not in the graph.
    #[error("Unknown node id: {0}")]
    UnknownNode(NodeId),

    /// A node was declared as its own dependency.
    #[error("Node {0} cannot depend on itself")]
    SelfDependency(NodeId),

    /// The root node cannot wait on another node.
    #[error("Root node cannot depend on {0}")]
    RootDependency(NodeId),

    /// A snapshot named a root that is not among its nodes.
    #[error("Root node {0} is missing from snapshot")]
    MissingRoot(NodeId),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests;
