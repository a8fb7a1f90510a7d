//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// ci-once - run `npm ci` only when package-lock.json changed
///
/// Records the SHA256 of the lockfile after each successful install and
/// skips the install while the lockfile stays the same.
#[derive(Parser, Debug)]
#[command(name = "ci-once")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLE:\n    npx ci-once")]
pub struct Cli {
    /// Emit debug logs
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "CI_ONCE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .ci-once.toml discovery
    #[arg(long)]
    pub no_local: bool,

    /// Lockfile to fingerprint (default: package-lock.json)
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Where to record the fingerprint (default: node_modules/.package-lock-sha256)
    #[arg(long, value_name = "PATH")]
    pub cache_path: Option<PathBuf>,

    /// Install command, run through the shell (default: npm ci)
    #[arg(long, value_name = "CMD")]
    pub command: Option<String>,
}
