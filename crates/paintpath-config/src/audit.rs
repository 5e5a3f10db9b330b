//! Options for the render-blocking resources audit.

use serde::{Deserialize, Serialize};

/// Resources whose download took less than this many milliseconds are not
/// flagged. Stylesheets loaded asynchronously through `rel=preload` and an
/// `onload` swap are detected as blocking, and they tend to finish quickly.
pub const DEFAULT_MINIMUM_WASTED_MS: f64 = 50.0;

/// How the counterfactual "inlined" graph is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InliningPolicy {
    /// Drop blocking resources and everything that depends on them, fold
    /// stylesheet bytes (minus unused CSS) into the document. Thresholds on
    /// simulated download time and reads the optimistic FCP estimate.
    #[default]
    ByteAware,
    /// Drop only the flagged resources themselves, fold their bytes into the
    /// document and any dropped CPU time into one merged task.
    /// Thresholds on observed download time and reads the pessimistic FCP
    /// estimate.
    SimpleMerge,
}

impl InliningPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InliningPolicy::ByteAware => "byte-aware",
            InliningPolicy::SimpleMerge => "simple-merge",
        }
    }
}

impl std::fmt::Display for InliningPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditOptions {
    #[serde(default)]
    pub policy: InliningPolicy,

    #[serde(default = "default_minimum_wasted_ms")]
    pub minimum_wasted_ms: f64,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            policy: InliningPolicy::default(),
            minimum_wasted_ms: DEFAULT_MINIMUM_WASTED_MS,
        }
    }
}

impl AuditOptions {
    pub fn with_policy(policy: InliningPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}

fn default_minimum_wasted_ms() -> f64 {
    DEFAULT_MINIMUM_WASTED_MS
}

/// Network and CPU throttling handed to the load simulator factory.
///
/// Defaults match a slow 4G connection on a mid-tier mobile device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrottlingSettings {
    #[serde(default = "default_rtt_ms")]
    pub rtt_ms: f64,

    #[serde(default = "default_throughput_kbps")]
    pub throughput_kbps: f64,

    #[serde(default = "default_cpu_slowdown_multiplier")]
    pub cpu_slowdown_multiplier: f64,
}

impl Default for ThrottlingSettings {
    fn default() -> Self {
        Self {
            rtt_ms: default_rtt_ms(),
            throughput_kbps: default_throughput_kbps(),
            cpu_slowdown_multiplier: default_cpu_slowdown_multiplier(),
        }
    }
}

fn default_rtt_ms() -> f64 {
    150.0
}

fn default_throughput_kbps() -> f64 {
    1.6 * 1024.0
}

fn default_cpu_slowdown_multiplier() -> f64 {
    4.0
}
