//! Schema validation for loaded configuration (no filesystem checks).

use crate::config::PaintpathConfig;
use crate::error::{ConfigError, Result};

impl PaintpathConfig {
    /// Reject values the estimator cannot work with.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.audit.minimum_wasted_ms;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(invalid(
                "audit.minimum_wasted_ms",
                format!("must be a non-negative number of milliseconds, got {threshold}"),
            ));
        }

        let throttling = [
            ("throttling.rtt_ms", self.throttling.rtt_ms),
            ("throttling.throughput_kbps", self.throttling.throughput_kbps),
            (
                "throttling.cpu_slowdown_multiplier",
                self.throttling.cpu_slowdown_multiplier,
            ),
        ];
        for (field, value) in throttling {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        if let Some(level) = &self.settings.log_level {
            if !matches!(
                level.to_ascii_lowercase().as_str(),
                "error" | "warn" | "info" | "debug" | "trace" | "off"
            ) {
                return Err(invalid(
                    "settings.log_level",
                    format!("unknown level '{level}'"),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, hint: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        hint: Some(hint),
    }
}
