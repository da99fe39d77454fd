//! Hosting-system port used by the sync and status services.

use crate::correlation::domain::{ProjectRef, ProjectUrl, RequestIdentity};
use crate::forge::domain::CommitSha;
use crate::jobs::RetryPolicy;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for hosting API operations.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Hosting API contract (GitLab, Pagure, ...).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForgeClient: Send + Sync {
    /// Resolves a project handle from its web URL.
    ///
    /// Returns `None` when the URL does not belong to a known project.
    async fn resolve_project(&self, project_url: &ProjectUrl) -> ForgeResult<Option<ProjectRef>>;

    /// Posts a comment on a merge/pull request.
    async fn comment(&self, request: &RequestIdentity, body: &str) -> ForgeResult<()>;

    /// Closes a merge/pull request.
    async fn close(&self, request: &RequestIdentity) -> ForgeResult<()>;

    /// Returns the latest commit of a merge/pull request.
    async fn head_commit(&self, request: &RequestIdentity) -> ForgeResult<CommitSha>;
}

/// Errors returned by hosting API adapters.
#[derive(Debug, Clone, Error)]
pub enum ForgeError {
    /// The project or request does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service account may not perform the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Network or API failure.
    #[error("hosting API error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ForgeError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Classifies the error for the caller's retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::NotFound(_) | Self::PermissionDenied(_) => RetryPolicy::NonRetryable,
            Self::Transport(_) => RetryPolicy::Retryable { after: None },
        }
    }
}
