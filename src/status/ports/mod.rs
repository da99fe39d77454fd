//! Status reporting port used to publish results on source requests.

use crate::correlation::domain::RequestIdentity;
use crate::forge::domain::CommitSha;
use crate::jobs::RetryPolicy;
use crate::status::domain::StatusReport;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for status reporting.
pub type StatusReporterResult<T> = Result<T, StatusReporterError>;

/// How a status report reached the source request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusDelivery {
    /// Set as a commit status.
    CommitStatus,
    /// Posted as a comment because the account cannot set commit statuses
    /// (typically on fork projects).
    CommentFallback,
}

impl StatusDelivery {
    /// Returns the delivery name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommitStatus => "commit_status",
            Self::CommentFallback => "comment_fallback",
        }
    }
}

/// Commit status publishing contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusReporter: Send + Sync {
    /// Publishes a status for one commit of a request.
    ///
    /// Implementations fall back to a comment when the commit status cannot
    /// be set and report which path was taken.
    async fn set_status(
        &self,
        request: &RequestIdentity,
        commit: &CommitSha,
        report: &StatusReport,
    ) -> StatusReporterResult<StatusDelivery>;
}

/// Errors returned by status reporter adapters.
#[derive(Debug, Clone, Error)]
pub enum StatusReporterError {
    /// Neither the commit status nor the fallback comment could be posted.
    #[error("status for {0} was rejected")]
    Rejected(RequestIdentity),

    /// Network or API failure.
    #[error("status reporting failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl StatusReporterError {
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
