//! Error types for merge-request event validation and target rules.

use thiserror::Error;

/// Errors returned while building sync domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncDomainError {
    /// A configured target pattern is not a valid regular expression.
    #[error("invalid target pattern '{pattern}': {reason}")]
    InvalidTargetPattern {
        /// The offending pattern as configured.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// The merge-request action is not one this engine understands.
    #[error("unknown merge request action: {0}")]
    UnknownAction(String),
}
