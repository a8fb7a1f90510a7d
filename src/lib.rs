//! ci-once - dependency install guard
//!
//! Skips an expensive, deterministic install step while the lockfile it
//! depends on is byte-for-byte unchanged since the last successful run.

pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod guard;
pub mod installer;
pub mod logging;
pub mod state;

pub use error::{CiOnceError, CiOnceResult};
pub use fingerprint::Fingerprint;
pub use guard::{Guard, GuardConfig, Outcome};
