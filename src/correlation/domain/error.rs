//! Error types for request identity validation.

use thiserror::Error;

/// Errors returned while constructing request identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CorrelationDomainError {
    /// The request number is invalid.
    #[error("invalid request number {0}, expected a positive integer")]
    InvalidRequestNumber(i128),

    /// The project URL is empty or contains whitespace.
    #[error("invalid project URL '{0}'")]
    InvalidProjectUrl(String),

    /// The project namespace is empty after trimming.
    #[error("project namespace must not be empty")]
    EmptyNamespace,

    /// The repository name is empty or contains a path separator.
    #[error("invalid repository name '{0}'")]
    InvalidRepoName(String),
}
