//! The render-blocking resources audit.

use paintpath_config::{AuditOptions, InliningPolicy, PaintpathConfig, ThrottlingSettings};
use serde::Serialize;
use tracing::{info, warn};

use crate::artifacts::{ArtifactError, ArtifactProvider, WastedBytesMap, wasted_bytes_by_url};
use crate::details::AuditResult;
use crate::savings::estimate_savings_from_inlining;
use crate::selector::{BlockingResourceSelector, ResultEntry};
use crate::{AuditError, Result};

/// Static description of the audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMeta {
    pub id: &'static str,
    pub title: &'static str,
    pub failure_title: &'static str,
    pub help_text: &'static str,
    pub required_artifacts: &'static [&'static str],
}

/// Flagged resources plus the graph-level savings estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedSavings {
    pub results: Vec<ResultEntry>,
    pub wasted_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RenderBlockingResources {
    options: AuditOptions,
    throttling: ThrottlingSettings,
}

impl RenderBlockingResources {
    /// Options are taken as given; use [`Self::from_config`] for values that
    /// have not been through validation.
    pub fn new(options: AuditOptions, throttling: ThrottlingSettings) -> Self {
        Self {
            options,
            throttling,
        }
    }

    /// Validate `config` and build the audit from its audit and throttling
    /// sections.
    pub fn from_config(config: &PaintpathConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.audit.clone(), config.throttling.clone()))
    }

    pub fn options(&self) -> &AuditOptions {
        &self.options
    }

    pub fn meta(&self) -> AuditMeta {
        let title = match self.options.policy {
            InliningPolicy::ByteAware => "Eliminate render-blocking resources",
            InliningPolicy::SimpleMerge => "Reduce render-blocking resources",
        };
        AuditMeta {
            id: "render-blocking-resources",
            title,
            failure_title: title,
            help_text: "Resources are blocking the first paint of your page. Consider \
                        delivering critical JS/CSS inline and deferring all non-critical \
                        JS/styles.",
            required_artifacts: &["TagsBlockingFirstPaint", "traces", "devtoolsLogs"],
        }
    }

    /// Select blocking resources and estimate the first-paint time saved by
    /// inlining them.
    ///
    /// Artifacts are awaited one after another. Trace, simulator and FCP
    /// failures abort the audit; an unused-CSS failure only zeroes the
    /// wasted-byte discount.
    #[tracing::instrument(skip_all, fields(policy = %self.options.policy))]
    pub async fn compute_results(&self, artifacts: &dyn ArtifactProvider) -> Result<ComputedSavings> {
        let trace = artifacts
            .trace_of_tab()
            .await
            .map_err(|source| AuditError::artifact("trace-of-tab", source))?;
        let simulator = artifacts
            .load_simulator(&self.throttling)
            .await
            .map_err(|source| AuditError::artifact("load-simulator", source))?;
        let fcp = artifacts
            .first_contentful_paint(simulator.clone())
            .await
            .map_err(|source| AuditError::artifact("first-contentful-paint", source))?;

        let (graph, estimate) = fcp.for_policy(self.options.policy);
        let selector = BlockingResourceSelector::new(graph, &estimate.node_timing, &self.options);
        let selection = selector.select(
            artifacts.tags_blocking_first_paint(),
            trace.first_contentful_paint_ms(),
        );

        if selection.is_empty() {
            info!("no render-blocking resources delayed first paint");
            return Ok(ComputedSavings {
                results: Vec::new(),
                wasted_ms: 0.0,
            });
        }

        let wasted_css_bytes = match self.options.policy {
            InliningPolicy::ByteAware => Self::compute_wasted_css_bytes(artifacts).await,
            InliningPolicy::SimpleMerge => WastedBytesMap::default(),
        };

        let savings = estimate_savings_from_inlining(
            simulator.as_ref(),
            graph,
            &selection.deferred,
            self.options.policy,
            &wasted_css_bytes,
        )?;

        info!(
            flagged = selection.results.len(),
            deferred = selection.deferred.len(),
            wasted_ms = savings.wasted_ms,
            "estimated render-blocking savings"
        );

        Ok(ComputedSavings {
            results: selection.results,
            wasted_ms: savings.wasted_ms,
        })
    }

    /// Unused stylesheet bytes by URL, or an empty map if the analysis fails.
    pub async fn compute_wasted_css_bytes(artifacts: &dyn ArtifactProvider) -> WastedBytesMap {
        match artifacts.unused_css().await {
            Ok(items) => wasted_bytes_by_url(&items),
            Err(err) => {
                warn!(error = %err, "unused CSS analysis failed; assuming no wasted bytes");
                WastedBytesMap::default()
            }
        }
    }

    pub async fn audit(&self, artifacts: &dyn ArtifactProvider) -> Result<AuditResult> {
        let ComputedSavings { results, wasted_ms } = self.compute_results(artifacts).await?;
        Ok(AuditResult::new(results, wasted_ms))
    }
}

impl AuditError {
    fn artifact(artifact: &'static str, source: ArtifactError) -> Self {
        AuditError::Artifact { artifact, source }
    }
}
