//! Artifact provider abstraction
//!
//! The audit never computes its inputs itself. Trace processing, network
//! graph construction, FCP simulation and unused-CSS analysis are owned by
//! other components; this module defines the data shapes they hand over and
//! the `ArtifactProvider` trait the audit pulls them through.

// Test utilities (available in test builds)
#[cfg(any(test, doctest, feature = "test-utils"))]
pub mod test_utils;

use std::sync::Arc;

use async_trait::async_trait;
use paintpath_config::{InliningPolicy, ThrottlingSettings};
use paintpath_graph::ResourceGraph;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::simulator::{Simulation, Simulator};

/// Result type for artifact computations
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Errors reported by an artifact provider
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// The provider has no data for this artifact
    #[error("Artifact '{0}' is not available")]
    Missing(String),

    /// Computing the artifact failed
    #[error("Failed to compute '{artifact}': {reason}")]
    Computation { artifact: String, reason: String },
}

impl ArtifactError {
    pub fn computation(artifact: impl Into<String>, reason: impl ToString) -> Self {
        Self::Computation {
            artifact: artifact.into(),
            reason: reason.to_string(),
        }
    }
}

/// Element reference inside a [`BlockingTag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
}

/// A `<link>` or `<script>` the browser reported as blocking first paint.
///
/// `start_time` and `end_time` are observed wall-clock seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockingTag {
    pub tag: TagRef,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub transfer_size: f64,
}

impl BlockingTag {
    pub fn new(url: impl Into<String>, start_time: f64, end_time: f64, transfer_size: f64) -> Self {
        Self {
            tag: TagRef {
                url: url.into(),
                tag_name: None,
            },
            start_time,
            end_time,
            transfer_size,
        }
    }

    pub fn url(&self) -> &str {
        &self.tag.url
    }

    pub fn end_time_ms(&self) -> f64 {
        self.end_time * 1000.0
    }

    /// Observed download duration in milliseconds, clamped at zero.
    pub fn observed_duration_ms(&self) -> f64 {
        non_negative((self.end_time - self.start_time) * 1000.0)
    }

    /// Reported transfer size as whole bytes, clamped at zero.
    pub fn total_bytes(&self) -> u64 {
        non_negative(self.transfer_size).round() as u64
    }
}

/// Processed trace of the audited page. Only the paint timestamps matter here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceOfTab {
    pub timestamps: TraceTimestamps,
}

/// Trace timestamps in microseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceTimestamps {
    pub first_contentful_paint: f64,
}

impl TraceOfTab {
    pub fn with_first_contentful_paint_ms(fcp_ms: f64) -> Self {
        Self {
            timestamps: TraceTimestamps {
                first_contentful_paint: fcp_ms * 1000.0,
            },
        }
    }

    pub fn first_contentful_paint_ms(&self) -> f64 {
        self.timestamps.first_contentful_paint / 1000.0
    }
}

/// One row of the unused-CSS analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedCssItem {
    pub url: String,
    pub wasted_bytes: f64,
}

/// Unused stylesheet bytes keyed by stylesheet URL.
pub type WastedBytesMap = HashMap<String, u64>;

/// Collapse unused-CSS rows into a URL map. Later rows for the same URL win.
pub fn wasted_bytes_by_url<'a, I>(items: I) -> WastedBytesMap
where
    I: IntoIterator<Item = &'a UnusedCssItem>,
{
    items
        .into_iter()
        .map(|item| {
            (
                item.url.clone(),
                non_negative(item.wasted_bytes).round() as u64,
            )
        })
        .collect()
}

/// Simulated first-contentful-paint artifact.
///
/// Carries the optimistic and pessimistic FCP subgraphs together with the
/// simulation of each.
#[derive(Debug, Clone)]
pub struct FcpSimulation {
    pub optimistic_graph: ResourceGraph,
    pub pessimistic_graph: ResourceGraph,
    pub optimistic_estimate: Simulation,
    pub pessimistic_estimate: Simulation,
}

impl FcpSimulation {
    /// Graph and estimate the given policy reads its timings from.
    pub fn for_policy(&self, policy: InliningPolicy) -> (&ResourceGraph, &Simulation) {
        match policy {
            InliningPolicy::ByteAware => (&self.optimistic_graph, &self.optimistic_estimate),
            InliningPolicy::SimpleMerge => (&self.pessimistic_graph, &self.pessimistic_estimate),
        }
    }
}

/// Source of everything the render-blocking audit consumes.
#[async_trait]
pub trait ArtifactProvider: Send + Sync + std::fmt::Debug {
    /// Tags the browser reported as blocking first paint, in report order
    fn tags_blocking_first_paint(&self) -> &[BlockingTag];

    /// Processed trace for the audited page
    async fn trace_of_tab(&self) -> ArtifactResult<TraceOfTab>;

    /// Build a load simulator for the given throttling
    async fn load_simulator(
        &self,
        throttling: &ThrottlingSettings,
    ) -> ArtifactResult<Arc<dyn Simulator>>;

    /// Simulate first contentful paint with `simulator`
    async fn first_contentful_paint(
        &self,
        simulator: Arc<dyn Simulator>,
    ) -> ArtifactResult<FcpSimulation>;

    /// Unused CSS rows. Failures here are tolerated by the audit.
    async fn unused_css(&self) -> ArtifactResult<Vec<UnusedCssItem>>;
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
