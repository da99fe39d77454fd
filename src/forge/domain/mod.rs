//! Value types shared by hosting-system adapters.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a commit hash is empty or not hexadecimal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid commit sha '{0}'")]
pub struct InvalidCommitSha(pub String);

/// A git commit hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitSha(String);

impl CommitSha {
    /// Creates a validated commit hash, normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCommitSha`] when the value is empty or contains
    /// non-hexadecimal characters.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidCommitSha> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || !normalized.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(InvalidCommitSha(raw));
        }
        Ok(Self(normalized.to_ascii_lowercase()))
    }

    /// Returns the hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
