use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashMap as HashMap};

use super::super::{Node, NodeId};

pub(super) type NodeMap = IndexMap<NodeId, Arc<Node>, FxBuildHasher>;
pub(super) type EdgeSet = IndexSet<NodeId, FxBuildHasher>;

/// Rooted DAG of load and compute tasks.
///
/// Edges point from a dependency to its dependents; the root is the
/// top-level document request and has no dependencies. Node payloads are
/// shared through `Arc` and never mutated after insertion, so cloning a graph
/// is cheap and the clone is fully independent of the original.
#[derive(Debug, Clone)]
pub struct ResourceGraph {
    pub(super) root: NodeId,
    pub(super) nodes: NodeMap,
    pub(super) dependencies: HashMap<NodeId, EdgeSet>,
    pub(super) dependents: HashMap<NodeId, EdgeSet>,
}
