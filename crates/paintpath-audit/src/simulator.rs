//! Load-simulator contract.
//!
//! The simulator itself lives outside this crate. Given a graph it estimates
//! when every node starts and finishes and how long the whole graph takes.
//! Instead of mutating nodes to model "what if this request were bigger",
//! callers pass per-node overrides in [`SimulationOptions`].

use std::fmt::Debug;

use indexmap::IndexMap;
use paintpath_graph::{Node, NodeId, NodeKind, ResourceGraph};
use rustc_hash::{FxBuildHasher, FxHashMap as HashMap};
use serde::{Deserialize, Serialize};

/// Per-node timing from one simulation run, in simulator order.
pub type NodeTimingMap = IndexMap<NodeId, NodeTiming, FxBuildHasher>;

/// Start and end of a node in virtual simulator milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTiming {
    pub start_time: f64,
    pub end_time: f64,
}

impl NodeTiming {
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
        }
    }

    /// Elapsed time, never negative even if the simulator reports an
    /// inverted or non-finite interval.
    pub fn duration(&self) -> f64 {
        let duration = self.end_time - self.start_time;
        if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    pub time_in_ms: f64,
    pub node_timing: NodeTimingMap,
}

/// Adjustments applied for the duration of a single `simulate` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationOptions {
    transfer_sizes: HashMap<NodeId, u64>,
}

impl SimulationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate `node` as if it transferred `bytes` instead of its recorded size.
    pub fn with_transfer_size(mut self, node: NodeId, bytes: u64) -> Self {
        self.transfer_sizes.insert(node, bytes);
        self
    }

    pub fn transfer_size_override(&self, node: &NodeId) -> Option<u64> {
        self.transfer_sizes.get(node).copied()
    }

    /// Bytes a simulator should charge for `node`; `None` for CPU nodes.
    pub fn transfer_size(&self, node: &Node) -> Option<u64> {
        match &node.kind {
            NodeKind::Network(record) => Some(
                self.transfer_size_override(&node.id)
                    .unwrap_or(record.transfer_size),
            ),
            NodeKind::Cpu(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transfer_sizes.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("graph contains a cycle through node {0}")]
    Cycle(NodeId),

    #[error("simulation failed: {0}")]
    Failed(String),
}

/// Page-load timing simulator.
///
/// Implementations must treat `graph` as read-only and honor every override
/// in `options`.
pub trait Simulator: Send + Sync + Debug {
    fn simulate(
        &self,
        graph: &ResourceGraph,
        options: &SimulationOptions,
    ) -> Result<Simulation, SimulatorError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintpath_graph::{CpuEvent, NetworkRecord, ResourceType};

    #[test]
    fn duration_is_clamped_at_zero() {
        assert_eq!(NodeTiming::new(100.0, 350.0).duration(), 250.0);
        assert_eq!(NodeTiming::new(300.0, 200.0).duration(), 0.0);
        assert_eq!(NodeTiming::new(0.0, f64::NAN).duration(), 0.0);
    }

    #[test]
    fn transfer_size_prefers_override() {
        let node = Node::network(
            "doc",
            NetworkRecord::new("https://example.com/", ResourceType::Document)
                .with_transfer_size(1_000),
        );
        let task = Node::cpu("task", CpuEvent::new(0, 10));

        let plain = SimulationOptions::new();
        assert_eq!(plain.transfer_size(&node), Some(1_000));
        assert!(plain.is_empty());

        let adjusted = SimulationOptions::new().with_transfer_size("doc".into(), 7_000);
        assert_eq!(adjusted.transfer_size(&node), Some(7_000));
        assert_eq!(adjusted.transfer_size(&task), None);
        assert_eq!(node.as_network().unwrap().transfer_size, 1_000);
    }
}
