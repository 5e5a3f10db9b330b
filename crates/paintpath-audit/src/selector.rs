//! Picks which blocking tags count as render-blocking and which graph nodes
//! the counterfactual may defer.

use paintpath_config::{AuditOptions, InliningPolicy};
use paintpath_graph::{NodeId, NodeIndex, ResourceGraph};
use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::artifacts::BlockingTag;
use crate::simulator::NodeTimingMap;

/// One flagged resource, as reported in the audit table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub url: String,
    pub total_bytes: u64,
    pub wasted_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Flagged resources in tag order
    pub results: Vec<ResultEntry>,
    /// Nodes the counterfactual graph may drop
    pub deferred: HashSet<NodeId>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

pub struct BlockingResourceSelector<'a> {
    graph: &'a ResourceGraph,
    timing: &'a NodeTimingMap,
    index: NodeIndex,
    options: &'a AuditOptions,
}

impl<'a> BlockingResourceSelector<'a> {
    /// Only nodes the simulation produced timing for are resolvable by URL.
    pub fn new(graph: &'a ResourceGraph, timing: &'a NodeTimingMap, options: &'a AuditOptions) -> Self {
        let index = NodeIndex::from_nodes(timing.keys().filter_map(|id| graph.node(id)));
        Self {
            graph,
            timing,
            index,
            options,
        }
    }

    /// Evaluate every tag against the first-contentful-paint time (ms).
    ///
    /// Tags finishing after FCP, tags with no matching timed node, and tags
    /// under the download threshold are skipped silently.
    pub fn select(&self, tags: &[BlockingTag], fcp_ts_ms: f64) -> Selection {
        let mut selection = Selection::default();
        let threshold = self.options.minimum_wasted_ms;

        for tag in tags {
            let url = tag.url();
            if tag.end_time_ms() > fcp_ts_ms {
                debug!(url, "blocking tag finished after first contentful paint");
                continue;
            }

            if self.options.policy == InliningPolicy::SimpleMerge
                && tag.observed_duration_ms() < threshold
            {
                debug!(url, "observed download below threshold");
                continue;
            }

            let Some(node_id) = self.index.get(url) else {
                debug!(url, "no timed network node for blocking tag");
                continue;
            };
            let Some(timing) = self.timing.get(node_id) else {
                continue;
            };

            let wasted_ms = timing.duration();
            if self.options.policy == InliningPolicy::ByteAware && wasted_ms < threshold {
                debug!(url, wasted_ms, "simulated download below threshold");
                continue;
            }

            selection.results.push(ResultEntry {
                url: url.to_string(),
                total_bytes: tag.total_bytes(),
                wasted_ms,
            });
            self.mark_deferred(node_id, &mut selection.deferred);
        }

        selection
    }

    /// Byte-aware defers the node and everything downstream of it. Simple
    /// merge defers only the node itself.
    fn mark_deferred(&self, id: &NodeId, deferred: &mut HashSet<NodeId>) {
        match self.options.policy {
            InliningPolicy::ByteAware => {
                self.graph.traverse(id, |node| {
                    deferred.insert(node.id.clone());
                });
            }
            InliningPolicy::SimpleMerge => {
                deferred.insert(id.clone());
            }
        }
    }
}
