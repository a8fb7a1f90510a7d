//! Content fingerprints for lockfiles
//!
//! A fingerprint is the lowercase hex SHA256 of the raw lockfile bytes.
//! Same bytes = same fingerprint, on every platform.

use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a hex-encoded SHA256 digest
const HEX_LEN: usize = 64;

/// SHA256 digest of a lockfile, hex encoded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hash the given bytes
    pub fn digest(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// Parse a previously recorded fingerprint
    ///
    /// Surrounding whitespace is ignored and uppercase digits are normalized,
    /// so a record edited by hand still compares equal. Anything other than
    /// 64 hex digits is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.len() != HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(s.to_ascii_lowercase()))
    }

    /// The hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
