pub mod audit;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logger;
pub mod settings;
pub mod validation;

// Re-export main types
pub use audit::*;
pub use config::*;
pub use error::*;
pub use settings::*;

pub use discovery::{CONFIG_FILE_NAME, ConfigDiscovery, discover, discover_with_profile};
pub use logger::{build_filter, init_logger};
