//! Default command - install if the lockfile changed

use crate::cli::Cli;
use crate::config::{Config, ConfigManager};
use crate::error::{CiOnceError, CiOnceResult};
use crate::guard::{Guard, GuardConfig, Outcome};
use std::path::Path;
use tracing::debug;

/// Load configuration for `cwd` and apply command-line overrides
pub async fn load_config(cli: &Cli, cwd: &Path) -> CiOnceResult<Config> {
    let config_path = match cli.config {
        Some(ref path) => Some(cwd.join(path)),
        None if cli.no_local => {
            debug!("Local config discovery disabled (--no-local)");
            None
        }
        None => {
            let found = ConfigManager::find_local_config(cwd);
            if let Some(ref path) = found {
                debug!("Found local config: {}", path.display());
            }
            found
        }
    };

    let manager = match config_path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let mut config = manager.load().await?;

    if cli.verbose > 0 {
        config.general.verbose = true;
    }
    if let Some(ref manifest) = cli.manifest {
        config.guard.manifest = manifest.clone();
    }
    if let Some(ref cache_path) = cli.cache_path {
        config.guard.cache_path = cache_path.clone();
    }
    if let Some(ref command) = cli.command {
        config.guard.command = command.clone();
    }

    Ok(config)
}

/// Execute the guarded install
pub async fn execute(config: GuardConfig) -> Outcome {
    let outcome = Guard::with_shell(config).run().await;
    if let Outcome::Skipped = outcome {
        debug!("Nothing to install");
    }
    outcome
}

/// Resolve the working directory the guard operates in
pub fn current_dir() -> CiOnceResult<std::path::PathBuf> {
    std::env::current_dir().map_err(|e| CiOnceError::io("getting current directory", e))
}
