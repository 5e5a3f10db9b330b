//! Counterfactual "inlined" graph construction.
//!
//! Built in two passes. [`CounterfactualPlan`] walks the graph once and
//! decides what to drop and how many bytes and CPU microseconds move onto
//! the document. [`CounterfactualPlan::build`] then clones the graph with a
//! pure keep-predicate and attaches the redistributed cost. The source graph
//! is never touched: the document's extra bytes travel as a
//! [`SimulationOptions`] override.

use paintpath_config::InliningPolicy;
use paintpath_graph::{CpuEvent, Node, NodeId, NodeKind, ResourceGraph, ResourceType};
use rustc_hash::FxHashSet as HashSet;

use crate::artifacts::WastedBytesMap;
use crate::simulator::SimulationOptions;
use crate::{AuditError, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterfactualPlan {
    /// Nodes left out of the counterfactual graph
    pub excluded: HashSet<NodeId>,
    /// Bytes added to the document's transfer size
    pub dropped_bytes: u64,
    /// Trace microseconds of CPU work folded into one merged task
    pub dropped_cpu_time: u64,
    /// Earliest start among the folded CPU tasks
    pub earliest_cpu_timestamp: Option<u64>,
}

/// A graph ready to simulate, plus the overrides it must be simulated with.
#[derive(Debug, Clone)]
pub struct Counterfactual {
    pub graph: ResourceGraph,
    pub options: SimulationOptions,
    pub merged_cpu_node: Option<NodeId>,
}

impl CounterfactualPlan {
    pub fn for_policy(
        policy: InliningPolicy,
        graph: &ResourceGraph,
        deferred: &HashSet<NodeId>,
        wasted_css_bytes: &WastedBytesMap,
    ) -> Self {
        match policy {
            InliningPolicy::ByteAware => Self::byte_aware(graph, deferred, wasted_css_bytes),
            InliningPolicy::SimpleMerge => Self::simple_merge(graph, deferred),
        }
    }

    /// Drop every deferred node. Stylesheets move onto the document minus
    /// their unused bytes; scripts and everything else simply disappear.
    pub fn byte_aware(
        graph: &ResourceGraph,
        deferred: &HashSet<NodeId>,
        wasted_css_bytes: &WastedBytesMap,
    ) -> Self {
        let mut plan = Self::default();
        plan.walk(graph, deferred, |plan, node| {
            if let NodeKind::Network(record) = &node.kind {
                if record.resource_type == ResourceType::Stylesheet {
                    let unused = wasted_css_bytes.get(&record.url).copied().unwrap_or(0);
                    plan.dropped_bytes = plan
                        .dropped_bytes
                        .saturating_add(record.transfer_size.saturating_sub(unused));
                }
            }
        });
        plan
    }

    /// Drop every deferred node. Network bytes move onto the document in
    /// full; CPU work collapses into a single task.
    pub fn simple_merge(graph: &ResourceGraph, deferred: &HashSet<NodeId>) -> Self {
        let mut plan = Self::default();
        plan.walk(graph, deferred, |plan, node| match &node.kind {
            NodeKind::Network(record) => {
                plan.dropped_bytes = plan.dropped_bytes.saturating_add(record.transfer_size);
            }
            NodeKind::Cpu(event) => {
                plan.dropped_cpu_time = plan.dropped_cpu_time.saturating_add(event.duration);
                plan.earliest_cpu_timestamp = Some(match plan.earliest_cpu_timestamp {
                    Some(earliest) => earliest.min(event.timestamp),
                    None => event.timestamp,
                });
            }
        });
        plan
    }

    /// Visit each deferred node reachable from the root, root excluded.
    fn walk<F>(&mut self, graph: &ResourceGraph, deferred: &HashSet<NodeId>, mut fold: F)
    where
        F: FnMut(&mut Self, &Node),
    {
        let root = graph.root_id();
        graph.traverse(root, |node| {
            if node.id == *root || !deferred.contains(&node.id) {
                return;
            }
            self.excluded.insert(node.id.clone());
            fold(self, node);
        });
    }

    pub fn keeps(&self, node: &Node) -> bool {
        !self.excluded.contains(&node.id)
    }

    /// The single task standing in for all folded CPU work, if any.
    pub fn merged_cpu_event(&self) -> Option<CpuEvent> {
        if self.dropped_cpu_time == 0 {
            return None;
        }
        Some(CpuEvent::new(
            self.earliest_cpu_timestamp.unwrap_or(0),
            self.dropped_cpu_time,
        ))
    }

    /// Clone `graph` without the excluded nodes and attach the redistributed
    /// cost to its root.
    pub fn build(&self, graph: &ResourceGraph) -> Result<Counterfactual> {
        let mut clone = graph.clone_with_relationships(|node| self.keeps(node));

        let merged_cpu_node = match self.merged_cpu_event() {
            Some(event) => {
                let id = merged_node_id(graph);
                Some(clone.add_dependent(Node::cpu(id, event))?)
            }
            None => None,
        };

        let mut options = SimulationOptions::new();
        if self.dropped_bytes > 0 {
            let root = graph.root();
            let record = root
                .as_network()
                .ok_or_else(|| AuditError::RootNotNetwork(root.id.clone()))?;
            options = options.with_transfer_size(
                root.id.clone(),
                record.transfer_size.saturating_add(self.dropped_bytes),
            );
        }

        Ok(Counterfactual {
            graph: clone,
            options,
            merged_cpu_node,
        })
    }
}

/// An id for the merged task that collides with nothing in `graph`.
fn merged_node_id(graph: &ResourceGraph) -> NodeId {
    let base = format!("{}:merged-cpu", graph.root_id());
    let mut candidate = NodeId::new(base.clone());
    let mut suffix = 1;
    while graph.contains(&candidate) {
        candidate = NodeId::new(format!("{base}-{suffix}"));
        suffix += 1;
    }
    candidate
}
