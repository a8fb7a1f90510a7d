//! Configuration schema for ci-once
//!
//! Configuration is read from `.ci-once.toml` in the project directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// What to guard and how to install
    pub guard: GuardSettings,
}

/// General application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Plain lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Guard settings, paths relative to the project directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardSettings {
    /// Lockfile whose content decides whether to install
    pub manifest: PathBuf,

    /// Where the fingerprint of the last successful install is kept
    pub cache_path: PathBuf,

    /// Install command, run through the shell
    pub command: String,
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("package-lock.json"),
            cache_path: PathBuf::from("node_modules/.package-lock-sha256"),
            command: "npm ci".to_string(),
        }
    }
}
