//! File-based config discovery.
//!
//! Finds `paintpath.toml` in a directory and loads it through the layered
//! figment pipeline (defaults, file, environment).

use std::path::{Path, PathBuf};

use crate::config::PaintpathConfig;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "paintpath.toml";

/// Searches a root directory for a paintpath configuration file.
///
/// # Example
///
/// ```no_run
/// use paintpath_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Load config from the discovered file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<PaintpathConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        PaintpathConfig::load(Some(&path), None)
    }

    pub fn load_with_profile(&self, profile: &str) -> Result<PaintpathConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        PaintpathConfig::load(Some(&path), Some(profile))
    }

    /// Load the discovered file, or defaults plus environment when there is
    /// none.
    pub fn load_or_default(&self) -> Result<PaintpathConfig> {
        let path = self.find();
        PaintpathConfig::load(path.as_deref(), None)
    }
}

/// Discover and load config from the current directory.
pub fn discover() -> Result<PaintpathConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

/// Discover and load config from the current directory with a profile.
pub fn discover_with_profile(profile: &str) -> Result<PaintpathConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_with_profile(profile)
}
