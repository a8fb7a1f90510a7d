//! Install guard
//!
//! Decides whether the install needs to run by comparing the lockfile
//! fingerprint with the one recorded after the last successful install.
//!
//! # Invariant
//!
//! The record is written only after the installer exited with status zero.
//! A failed, signaled or interrupted install leaves the previous record in
//! place, so the next run installs again.
//!
//! | Record | Lockfile | Result |
//! |--------|----------|--------|
//! | missing / corrupt | any | install |
//! | matches | unchanged | skip |
//! | stale | changed | install |

use crate::config::GuardSettings;
use crate::error::{CiOnceError, CiOnceResult};
use crate::fingerprint::Fingerprint;
use crate::installer::{signal_name, Installer, ShellInstaller, Termination};
use crate::state::{StateLookup, StateStore};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Resolved settings for one guarded run
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Directory the installer runs in
    pub root: PathBuf,
    /// Absolute path of the lockfile
    pub manifest_path: PathBuf,
    /// Absolute path of the state record
    pub cache_path: PathBuf,
    /// Install command line
    pub command: String,
    /// Emit debug diagnostics
    pub verbose: bool,
}

impl GuardConfig {
    /// Resolve settings against a project directory
    pub fn resolve(root: &Path, settings: &GuardSettings, verbose: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            manifest_path: root.join(&settings.manifest),
            cache_path: root.join(&settings.cache_path),
            command: settings.command.clone(),
            verbose,
        }
    }
}

/// How a guarded run ended
#[derive(Debug)]
pub enum Outcome {
    /// Lockfile unchanged since the last successful install
    Skipped,
    /// Installer succeeded and the new fingerprint was recorded
    Installed,
    /// Something went wrong; the record is unchanged unless the error is
    /// `StatePersist`, in which case the install itself succeeded
    Failed(CiOnceError),
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Skipped | Self::Installed => 0,
            Self::Failed(_) => 1,
        }
    }
}

/// Runs the installer only when the lockfile changed
pub struct Guard {
    config: GuardConfig,
    store: StateStore,
    installer: Box<dyn Installer>,
}

impl Guard {
    /// Create a guard with an explicit installer
    pub fn new(config: GuardConfig, installer: Box<dyn Installer>) -> Self {
        let store = StateStore::new(config.cache_path.clone());
        Self {
            config,
            store,
            installer,
        }
    }

    /// Create a guard that runs the configured command through the shell
    pub fn with_shell(config: GuardConfig) -> Self {
        let installer = ShellInstaller::new(config.command.clone(), config.root.clone());
        Self::new(config, Box::new(installer))
    }

    /// Run the guard once
    pub async fn run(&self) -> Outcome {
        match self.try_run().await {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Failed(e),
        }
    }

    async fn try_run(&self) -> CiOnceResult<Outcome> {
        debug!(
            "Hash value is read from '{}'.",
            self.store.path().display()
        );

        let (manifest, recorded) = tokio::join!(
            fs::read(&self.config.manifest_path),
            self.store.lookup()
        );

        let manifest = manifest.map_err(|e| CiOnceError::ManifestUnreadable {
            path: self.config.manifest_path.clone(),
            source: e,
        })?;
        let computed = Fingerprint::digest(&manifest);

        match &recorded {
            StateLookup::Recorded(fp) => debug!("Recorded hash value: {}", fp),
            StateLookup::Missing => debug!("Recorded hash value: not found"),
            StateLookup::Corrupt => debug!("Recorded hash value: unparseable, ignoring"),
            StateLookup::Unreadable(e) => debug!("Recorded hash value: unreadable ({}), ignoring", e),
        }
        debug!("Computed hash value: {}", computed);

        if recorded.into_fingerprint().as_ref() == Some(&computed) {
            debug!("{} was unchanged.", self.config.manifest_path.display());
            return Ok(Outcome::Skipped);
        }

        self.install().await?;

        self.store
            .write(&computed)
            .await
            .map_err(|e| CiOnceError::StatePersist {
                path: self.store.path().to_path_buf(),
                source: e,
            })?;
        debug!("Hash value is written.");

        Ok(Outcome::Installed)
    }

    async fn install(&self) -> CiOnceResult<()> {
        let command = self.installer.describe();
        info!("Running {}...", command);

        let termination = self
            .installer
            .install()
            .await
            .map_err(|e| CiOnceError::Spawn {
                command: command.clone(),
                source: e,
            })?;

        match termination {
            Termination::Exited(0) => {
                debug!("{} finished.", command);
                Ok(())
            }
            Termination::Exited(code) => Err(CiOnceError::InstallerExitCode { command, code }),
            Termination::Signaled(signal) => Err(CiOnceError::InstallerSignal {
                command,
                signal: signal_name(signal),
            }),
        }
    }
}
