//! Error types for status normalization.

use thiserror::Error;

/// Errors returned while interpreting downstream status events.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusDomainError {
    /// The status value is outside the known vocabulary.
    #[error("unknown {vocabulary} status '{status}'")]
    UnknownStatus {
        /// Which vocabulary was consulted (`pipeline` or `flag`).
        vocabulary: &'static str,
        /// The raw status value.
        status: String,
    },
}
