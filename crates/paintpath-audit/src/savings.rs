//! First-paint savings from inlining the deferred resources.

use paintpath_config::InliningPolicy;
use paintpath_graph::{NodeId, ResourceGraph};
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;
use tracing::debug;

use crate::Result;
use crate::artifacts::WastedBytesMap;
use crate::counterfactual::CounterfactualPlan;
use crate::simulator::{SimulationOptions, Simulator};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsEstimate {
    pub original_ms: f64,
    pub counterfactual_ms: f64,
    /// Bytes folded into the document request
    pub inlined_bytes: u64,
    /// Trace microseconds folded into the merged CPU task
    pub merged_cpu_time: u64,
    /// `original_ms - counterfactual_ms`, never negative
    pub wasted_ms: f64,
}

/// Simulate `graph` as-is and with `deferred` inlined, and report the
/// difference.
///
/// `graph` is only read; both simulations see their own inputs. A failed
/// simulation propagates and leaves no trace on the graph.
pub fn estimate_savings_from_inlining(
    simulator: &dyn Simulator,
    graph: &ResourceGraph,
    deferred: &HashSet<NodeId>,
    policy: InliningPolicy,
    wasted_css_bytes: &WastedBytesMap,
) -> Result<SavingsEstimate> {
    let original = simulator.simulate(graph, &SimulationOptions::new())?;

    let plan = CounterfactualPlan::for_policy(policy, graph, deferred, wasted_css_bytes);
    let counterfactual = plan.build(graph)?;
    let inlined = simulator.simulate(&counterfactual.graph, &counterfactual.options)?;

    let wasted_ms = clamp_savings(original.time_in_ms - inlined.time_in_ms);
    debug!(
        %policy,
        original_ms = original.time_in_ms,
        counterfactual_ms = inlined.time_in_ms,
        excluded = plan.excluded.len(),
        inlined_bytes = plan.dropped_bytes,
        wasted_ms,
        "estimated savings from inlining"
    );

    Ok(SavingsEstimate {
        original_ms: original.time_in_ms,
        counterfactual_ms: inlined.time_in_ms,
        inlined_bytes: plan.dropped_bytes,
        merged_cpu_time: plan.dropped_cpu_time,
        wasted_ms,
    })
}

fn clamp_savings(delta: f64) -> f64 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}
