//! Configuration management for ci-once

pub mod schema;

pub use schema::{Config, GeneralConfig, GuardSettings, LogFormat};

use crate::error::{CiOnceError, CiOnceResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// Name of the project-local config file
pub const LOCAL_CONFIG_FILE: &str = ".ci-once.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a config manager that only yields defaults
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
        }
    }

    /// Find `.ci-once.toml` in the given directory
    pub fn find_local_config(dir: &Path) -> Option<PathBuf> {
        let path = dir.join(LOCAL_CONFIG_FILE);
        path.is_file().then_some(path)
    }

    /// Load configuration, falling back to defaults if the file does not exist
    pub async fn load(&self) -> CiOnceResult<Config> {
        match self.config_path {
            Some(ref path) if path.exists() => self.load_from_file(path).await,
            Some(ref path) => {
                // Discovered files always exist, so this path came from the user
                warn!("Config file {} not found, using defaults", path.display());
                Ok(Config::default())
            }
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> CiOnceResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| CiOnceError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| CiOnceError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
