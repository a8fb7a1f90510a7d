//! Persisted fingerprint of the last successful install
//!
//! The record is a single file holding the bare hex fingerprint. Writes go to
//! a sibling temp file first and are renamed into place, so a reader sees
//! either the previous record or the new one, never a partial write.

use crate::fingerprint::Fingerprint;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// What was found at the record path
#[derive(Debug)]
pub enum StateLookup {
    /// No record yet (first run, or the install directory was wiped)
    Missing,
    /// The file exists but does not hold a fingerprint
    Corrupt,
    /// The file could not be read
    Unreadable(std::io::Error),
    /// A fingerprint from a previous successful install
    Recorded(Fingerprint),
}

impl StateLookup {
    /// Collapse to the recorded fingerprint, if any
    pub fn into_fingerprint(self) -> Option<Fingerprint> {
        match self {
            Self::Recorded(fp) => Some(fp),
            _ => None,
        }
    }
}

/// Reads and writes the state record
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the record file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inspect the record, keeping the reason it may be unusable
    pub async fn lookup(&self) -> StateLookup {
        match fs::read_to_string(&self.path).await {
            Ok(content) => match Fingerprint::parse(&content) {
                Some(fp) => StateLookup::Recorded(fp),
                None => StateLookup::Corrupt,
            },
            Err(e) if e.kind() == ErrorKind::NotFound => StateLookup::Missing,
            // Non-UTF-8 content is garbage, not an IO failure
            Err(e) if e.kind() == ErrorKind::InvalidData => StateLookup::Corrupt,
            Err(e) => StateLookup::Unreadable(e),
        }
    }

    /// Previously recorded fingerprint; any problem reads as absent
    pub async fn read(&self) -> Option<Fingerprint> {
        self.lookup().await.into_fingerprint()
    }

    /// Record a fingerprint, creating parent directories as needed
    pub async fn write(&self, fingerprint: &Fingerprint) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, fingerprint.as_str()).await?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e);
        }

        debug!("Recorded {} in {}", fingerprint, self.path.display());
        Ok(())
    }

    /// Sibling of the record, always in the same directory
    fn tmp_path(&self) -> PathBuf {
        let mut path = self.path.as_os_str().to_os_string();
        path.push(".tmp");
        PathBuf::from(path)
    }
}
