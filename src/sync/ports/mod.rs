//! Content-sync port used to create and update dist-git requests.

use crate::jobs::RetryPolicy;
use crate::sync::domain::{DownstreamRequest, PackageConfig, SyncReleaseRequest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for content-sync operations.
pub type ContentSyncResult<T> = Result<T, ContentSyncError>;

/// Content-sync contract.
///
/// Implementations own spec-file parsing, patch generation and pushing to
/// dist-git; the engine only decides when to call them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSync: Send + Sync {
    /// Lists the branches of the package's dist-git repository.
    async fn downstream_branches(&self, package: &PackageConfig)
    -> ContentSyncResult<Vec<String>>;

    /// Pushes the source changes to dist-git and opens or updates the
    /// downstream request.
    ///
    /// Returns `None` when there was nothing to push.
    async fn sync_release(
        &self,
        request: &SyncReleaseRequest,
    ) -> ContentSyncResult<Option<DownstreamRequest>>;
}

/// Errors returned by content-sync adapters.
#[derive(Debug, Clone, Error)]
pub enum ContentSyncError {
    /// The source content cannot be synchronized as-is.
    #[error("content rejected: {0}")]
    Rejected(String),

    /// Git, network or API failure.
    #[error("content sync failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ContentSyncError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Classifies the error for the caller's retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Rejected(_) => RetryPolicy::NonRetryable,
            Self::Transport(_) => RetryPolicy::Retryable { after: None },
        }
    }
}
