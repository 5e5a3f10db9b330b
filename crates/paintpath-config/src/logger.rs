//! Logging setup using the `tracing` ecosystem.
//!
//! Library crates only emit events; a host process calls [`init_logger`]
//! once with the loaded [`GlobalSettings`] to install a subscriber.
//!
//! # Example
//!
//! ```rust,no_run
//! use paintpath_config::{GlobalSettings, init_logger};
//!
//! init_logger(&GlobalSettings::default()).unwrap();
//! tracing::info!("estimating render-blocking savings");
//! ```

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::error::{ConfigError, Result};
use crate::settings::{GlobalSettings, LogFormat};

const CRATES: [&str; 3] = ["paintpath_audit", "paintpath_graph", "paintpath_config"];

/// Build the event filter for the given settings.
///
/// The level is chosen in this order:
/// 1. `trace = true`: TRACE for paintpath crates
/// 2. `log_level`: that level for paintpath crates
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for paintpath crates
pub fn build_filter(settings: &GlobalSettings) -> Result<EnvFilter> {
    let level = if settings.trace {
        Some("trace".to_string())
    } else {
        settings.log_level.as_ref().map(|level| level.to_ascii_lowercase())
    };

    match level {
        Some(level) => EnvFilter::try_new(directives(&level)).map_err(|e| {
            ConfigError::InvalidValue {
                field: "settings.log_level".to_string(),
                hint: Some(e.to_string()),
            }
        }),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directives("info")))),
    }
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed or the level is not valid.
pub fn init_logger(settings: &GlobalSettings) -> Result<()> {
    let filter = build_filter(settings)?;
    let ansi = !settings.no_color;

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> =
        match settings.log_format.unwrap_or_default() {
            LogFormat::Compact => fmt::layer()
                .with_target(false)
                .with_ansi(ansi)
                .compact()
                .boxed(),
            LogFormat::Pretty => fmt::layer().with_ansi(ansi).pretty().boxed(),
            LogFormat::Full => fmt::layer().with_ansi(ansi).boxed(),
        };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .map_err(|e| ConfigError::Logger(e.to_string()))
}

fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
