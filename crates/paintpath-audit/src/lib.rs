//! # paintpath-audit
//!
//! Estimates how much sooner a page could paint if the resources that
//! blocked its first paint were inlined into the document.
//!
//! The audit pulls its inputs through an [`ArtifactProvider`]: the blocking
//! tags the browser reported, the processed trace, a load [`Simulator`] and
//! the simulated first-contentful-paint graphs. It then
//!
//! 1. selects the blocking resources that finished before first paint and
//!    took long enough to matter ([`BlockingResourceSelector`]),
//! 2. builds a counterfactual graph with those resources inlined
//!    ([`CounterfactualPlan`]), and
//! 3. simulates both graphs and reports the difference, clamped at zero
//!    ([`estimate_savings_from_inlining`]).
//!
//! Two [`InliningPolicy`] variants decide what "inlined" means. See
//! `paintpath-config` for how the policy and threshold are configured.
//!
//! ```rust,ignore
//! let audit = RenderBlockingResources::from_config(&config)?;
//! let result = audit.audit(&artifacts).await?;
//! println!("{}", result.display_value);
//! ```

pub mod artifacts;
pub mod audit;
pub mod counterfactual;
pub mod details;
pub mod savings;
pub mod selector;
pub mod simulator;

pub use artifacts::{
    ArtifactError, ArtifactProvider, ArtifactResult, BlockingTag, FcpSimulation, TagRef,
    TraceOfTab, TraceTimestamps, UnusedCssItem, WastedBytesMap, wasted_bytes_by_url,
};
pub use audit::{AuditMeta, ComputedSavings, RenderBlockingResources};
pub use counterfactual::{Counterfactual, CounterfactualPlan};
pub use details::{AuditResult, TableDetails, TableHeading, display_value, score_for_wasted_ms};
pub use paintpath_config::{AuditOptions, InliningPolicy, ThrottlingSettings};
pub use savings::{SavingsEstimate, estimate_savings_from_inlining};
pub use selector::{BlockingResourceSelector, ResultEntry, Selection};
pub use simulator::{
    NodeTiming, NodeTimingMap, Simulation, SimulationOptions, Simulator, SimulatorError,
};

// Test utilities (available in test builds or with the `test-utils` feature)
#[cfg(any(test, doctest, feature = "test-utils"))]
pub use artifacts::test_utils::{FailingSimulator, TestArtifacts, TestSimulator};

#[cfg(any(test, doctest, feature = "test-utils"))]
pub mod test_utils {
    pub use super::artifacts::test_utils::*;
}

use paintpath_config::ConfigError;
use paintpath_graph::{GraphError, NodeId};

/// Errors that abort the audit.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// A required artifact could not be produced
    #[error("Failed to obtain {artifact}: {source}")]
    Artifact {
        artifact: &'static str,
        #[source]
        source: ArtifactError,
    },

    /// The load simulator failed
    #[error(transparent)]
    Simulation(#[from] SimulatorError),

    /// The counterfactual graph could not be assembled
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Audit options failed validation
    #[error("Invalid audit configuration: {0}")]
    Config(#[from] ConfigError),

    /// Inlined bytes have to land on a network request
    #[error("Root node {0} is not a network request")]
    RootNotNetwork(NodeId),
}

/// Result type alias for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests;
