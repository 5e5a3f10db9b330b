//! High-level configuration structure for paintpath.
//!
//! This module provides the main `PaintpathConfig` struct, layered loading
//! and profile merging. For file discovery, see the `discovery` module.

use std::collections::HashMap;
use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::audit::{AuditOptions, ThrottlingSettings};
use crate::error::{ConfigError, Result as ConfigResult};
use crate::settings::GlobalSettings;

/// Prefix for environment overrides, e.g. `PAINTPATH_AUDIT__POLICY=simple-merge`.
pub const ENV_PREFIX: &str = "PAINTPATH_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaintpathConfig {
    #[serde(default)]
    pub audit: AuditOptions,

    #[serde(default)]
    pub throttling: ThrottlingSettings,

    #[serde(default)]
    pub settings: GlobalSettings,

    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

/// Partial overrides applied on top of the base sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub audit: Value,

    #[serde(default)]
    pub throttling: Value,

    #[serde(default)]
    pub settings: Value,
}

impl PaintpathConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use paintpath_config::{InliningPolicy, PaintpathConfig};
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "audit": { "policy": "simple-merge", "minimum_wasted_ms": 75.0 }
    /// });
    ///
    /// let config = PaintpathConfig::from_value(value).unwrap();
    /// assert_eq!(config.audit.policy, InliningPolicy::SimpleMerge);
    /// assert_eq!(config.audit.minimum_wasted_ms, 75.0);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Layered sources: defaults, then the TOML file (if any), then
    /// `PAINTPATH_` environment variables with `__` separating sections.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load, apply `profile`, and validate.
    pub fn load(path: Option<&Path>, profile: Option<&str>) -> ConfigResult<Self> {
        let config: Self = Self::figment(path)
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        let config = config.materialize_profile(profile)?;
        config.validate()?;

        tracing::debug!(
            policy = %config.audit.policy,
            minimum_wasted_ms = config.audit.minimum_wasted_ms,
            "loaded paintpath configuration"
        );
        Ok(config)
    }

    pub fn materialize_profile(mut self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };
        let profile_cfg = self
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

        self.audit = apply_override(&self.audit, &profile_cfg.audit)?;
        self.throttling = apply_override(&self.throttling, &profile_cfg.throttling)?;
        self.settings = apply_override(&self.settings, &profile_cfg.settings)?;

        Ok(self)
    }
}

fn apply_override<T>(base: &T, update: &Value) -> ConfigResult<T>
where
    T: Serialize + for<'de> Deserialize<'de> + Clone,
{
    if update.is_null() {
        return Ok(base.clone());
    }

    let mut merged =
        serde_json::to_value(base).map_err(|err| ConfigError::InvalidProfileOverride {
            message: err.to_string(),
        })?;
    merge_values(&mut merged, update);
    serde_json::from_value(merged).map_err(|err| ConfigError::InvalidProfileOverride {
        message: err.to_string(),
    })
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
