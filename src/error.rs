//! Error types for ci-once
//!
//! All modules use `CiOnceResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ci-once operations
pub type CiOnceResult<T> = Result<T, CiOnceError>;

/// All errors that can occur in ci-once
#[derive(Error, Debug)]
pub enum CiOnceError {
    // Manifest errors
    #[error("{} can't be read: {source}", .path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Installer errors
    #[error("Failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with non-zero code: {code}")]
    InstallerExitCode { command: String, code: i32 },

    #[error("{command} was terminated by {signal}")]
    InstallerSignal { command: String, signal: String },

    // State errors
    #[error("Install succeeded but the hash could not be written to {}: {source}", .path.display())]
    StatePersist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {}: {reason}", .path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl CiOnceError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether the installer itself failed (as opposed to the bookkeeping around it)
    pub fn is_install_failure(&self) -> bool {
        matches!(
            self,
            Self::Spawn { .. } | Self::InstallerExitCode { .. } | Self::InstallerSignal { .. }
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ManifestUnreadable { .. } => {
                Some("Run ci-once from the directory that contains the lockfile, or pass --manifest")
            }
            Self::Spawn { .. } => Some("Check that the install command is on PATH"),
            Self::StatePersist { .. } => {
                Some("Dependencies are installed, but the next run will install them again")
            }
            _ => None,
        }
    }
}
