//! Test doubles for the audit's collaborators.
//!
//! `TestSimulator` is a deterministic critical-path model: a node starts when
//! its last dependency finishes, network nodes cost one round trip plus their
//! bytes over a fixed throughput, CPU nodes cost their traced duration.
//! `TestArtifacts` serves fixed artifacts built around one graph.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use paintpath_config::ThrottlingSettings;
use paintpath_graph::{NodeId, NodeKind, ResourceGraph};
use rustc_hash::FxHashSet as HashSet;

use super::{
    ArtifactError, ArtifactProvider, ArtifactResult, BlockingTag, FcpSimulation, TraceOfTab,
    UnusedCssItem,
};
use crate::simulator::{
    NodeTiming, NodeTimingMap, Simulation, SimulationOptions, Simulator, SimulatorError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TestSimulator {
    pub rtt_ms: f64,
    pub bytes_per_ms: f64,
}

impl TestSimulator {
    pub fn new(rtt_ms: f64, bytes_per_ms: f64) -> Self {
        Self {
            rtt_ms,
            bytes_per_ms,
        }
    }

    fn node_cost(&self, graph: &ResourceGraph, id: &NodeId, options: &SimulationOptions) -> f64 {
        let Some(node) = graph.node(id) else {
            return 0.0;
        };
        match &node.kind {
            NodeKind::Network(_) => {
                let bytes = options.transfer_size(node).unwrap_or(0) as f64;
                self.rtt_ms + bytes / self.bytes_per_ms
            }
            NodeKind::Cpu(event) => event.duration_ms(),
        }
    }

    fn finish_time(
        &self,
        graph: &ResourceGraph,
        id: &NodeId,
        options: &SimulationOptions,
        timing: &mut NodeTimingMap,
        in_progress: &mut HashSet<NodeId>,
    ) -> Result<f64, SimulatorError> {
        if let Some(done) = timing.get(id) {
            return Ok(done.end_time);
        }
        if !in_progress.insert(id.clone()) {
            return Err(SimulatorError::Cycle(id.clone()));
        }

        let mut start = 0.0_f64;
        for dependency in graph.dependency_ids(id) {
            let end = self.finish_time(graph, dependency, options, timing, in_progress)?;
            start = start.max(end);
        }
        let end = start + self.node_cost(graph, id, options);

        in_progress.remove(id);
        timing.insert(id.clone(), NodeTiming::new(start, end));
        Ok(end)
    }
}

impl Simulator for TestSimulator {
    fn simulate(
        &self,
        graph: &ResourceGraph,
        options: &SimulationOptions,
    ) -> Result<Simulation, SimulatorError> {
        let mut resolved = NodeTimingMap::default();
        let mut in_progress = HashSet::default();
        for node in graph.nodes() {
            self.finish_time(graph, &node.id, options, &mut resolved, &mut in_progress)?;
        }

        // Report in graph order rather than resolution order.
        let node_timing: NodeTimingMap = graph
            .nodes()
            .filter_map(|node| resolved.get(&node.id).map(|t| (node.id.clone(), *t)))
            .collect();
        let time_in_ms = node_timing
            .values()
            .map(|t| t.end_time)
            .fold(0.0, f64::max);

        Ok(Simulation {
            time_in_ms,
            node_timing,
        })
    }
}

/// Delegates to a [`TestSimulator`] but fails on the n-th call (1-based).
#[derive(Debug)]
pub struct FailingSimulator {
    inner: TestSimulator,
    fail_on_call: usize,
    calls: AtomicUsize,
}

impl FailingSimulator {
    pub fn new(inner: TestSimulator, fail_on_call: usize) -> Self {
        Self {
            inner,
            fail_on_call,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Simulator for FailingSimulator {
    fn simulate(
        &self,
        graph: &ResourceGraph,
        options: &SimulationOptions,
    ) -> Result<Simulation, SimulatorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on_call {
            return Err(SimulatorError::Failed(format!("injected failure on call {call}")));
        }
        self.inner.simulate(graph, options)
    }
}

/// Fixed artifacts around a single page graph.
///
/// The same graph serves as both FCP subgraphs unless a separate pessimistic
/// graph is supplied.
#[derive(Debug, Clone)]
pub struct TestArtifacts {
    graph: ResourceGraph,
    pessimistic_graph: Option<ResourceGraph>,
    simulator: Arc<dyn Simulator>,
    tags: Vec<BlockingTag>,
    trace: TraceOfTab,
    unused_css: Result<Vec<UnusedCssItem>, String>,
    fcp_failure: Option<String>,
}

impl TestArtifacts {
    pub fn new(graph: ResourceGraph, simulator: Arc<dyn Simulator>) -> Self {
        Self {
            graph,
            pessimistic_graph: None,
            simulator,
            tags: Vec::new(),
            trace: TraceOfTab::default(),
            unused_css: Ok(Vec::new()),
            fcp_failure: None,
        }
    }

    pub fn with_tag(mut self, tag: BlockingTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_fcp_ms(mut self, fcp_ms: f64) -> Self {
        self.trace = TraceOfTab::with_first_contentful_paint_ms(fcp_ms);
        self
    }

    pub fn with_pessimistic_graph(mut self, graph: ResourceGraph) -> Self {
        self.pessimistic_graph = Some(graph);
        self
    }

    pub fn with_unused_css(mut self, items: Vec<UnusedCssItem>) -> Self {
        self.unused_css = Ok(items);
        self
    }

    pub fn with_unused_css_failure(mut self, reason: impl Into<String>) -> Self {
        self.unused_css = Err(reason.into());
        self
    }

    pub fn with_fcp_failure(mut self, reason: impl Into<String>) -> Self {
        self.fcp_failure = Some(reason.into());
        self
    }

    pub fn graph(&self) -> &ResourceGraph {
        &self.graph
    }
}

#[async_trait]
impl ArtifactProvider for TestArtifacts {
    fn tags_blocking_first_paint(&self) -> &[BlockingTag] {
        &self.tags
    }

    async fn trace_of_tab(&self) -> ArtifactResult<TraceOfTab> {
        Ok(self.trace.clone())
    }

    async fn load_simulator(
        &self,
        _throttling: &ThrottlingSettings,
    ) -> ArtifactResult<Arc<dyn Simulator>> {
        Ok(Arc::clone(&self.simulator))
    }

    async fn first_contentful_paint(
        &self,
        simulator: Arc<dyn Simulator>,
    ) -> ArtifactResult<FcpSimulation> {
        if let Some(reason) = &self.fcp_failure {
            return Err(ArtifactError::computation("first-contentful-paint", reason));
        }

        let pessimistic_graph = self
            .pessimistic_graph
            .clone()
            .unwrap_or_else(|| self.graph.clone());
        let options = SimulationOptions::new();
        let optimistic_estimate = simulator
            .simulate(&self.graph, &options)
            .map_err(|e| ArtifactError::computation("first-contentful-paint", e))?;
        let pessimistic_estimate = simulator
            .simulate(&pessimistic_graph, &options)
            .map_err(|e| ArtifactError::computation("first-contentful-paint", e))?;

        Ok(FcpSimulation {
            optimistic_graph: self.graph.clone(),
            pessimistic_graph,
            optimistic_estimate,
            pessimistic_estimate,
        })
    }

    async fn unused_css(&self) -> ArtifactResult<Vec<UnusedCssItem>> {
        self.unused_css
            .clone()
            .map_err(|reason| ArtifactError::computation("unused-css-rules", reason))
    }
}
