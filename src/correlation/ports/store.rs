//! Store port for source ↔ downstream request correlation.

use crate::correlation::domain::{LinkOutcome, RequestIdentity, SourceRecord};
use crate::jobs::RetryPolicy;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for correlation store operations.
pub type CorrelationStoreResult<T> = Result<T, CorrelationStoreError>;

/// Correlation persistence contract.
///
/// Implementations must make each get-or-create atomic for a single
/// source/downstream pair: concurrent callers racing on the same source
/// observe exactly one inserted link.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CorrelationStore: Send + Sync {
    /// Returns the record for a source request, creating it when absent.
    ///
    /// `first_seen_at` is only stored when this call creates the record.
    async fn get_or_create_source_record(
        &self,
        identity: &RequestIdentity,
        first_seen_at: DateTime<Utc>,
    ) -> CorrelationStoreResult<SourceRecord>;

    /// Links a source record to a downstream request.
    ///
    /// Repeating the call with the same pair is a no-op reported as
    /// [`LinkOutcome::Existing`]. When the source is already linked to a
    /// different downstream request the existing link is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationStoreError::DownstreamClaimed`] when the
    /// downstream request already belongs to another source request.
    async fn get_or_create_link(
        &self,
        source: &SourceRecord,
        downstream: &RequestIdentity,
        linked_at: DateTime<Utc>,
    ) -> CorrelationStoreResult<LinkOutcome>;

    /// Finds the downstream request linked to a source record.
    async fn lookup_downstream_by_source(
        &self,
        source: &SourceRecord,
    ) -> CorrelationStoreResult<Option<RequestIdentity>>;

    /// Finds the source request linked to a downstream request.
    async fn lookup_source_by_downstream(
        &self,
        downstream: &RequestIdentity,
    ) -> CorrelationStoreResult<Option<RequestIdentity>>;
}

/// Errors returned by correlation store implementations.
#[derive(Debug, Clone, Error)]
pub enum CorrelationStoreError {
    /// The downstream request is linked to a different source request.
    #[error("downstream request {downstream} is already linked to {owner}")]
    DownstreamClaimed {
        /// Downstream request that was requested.
        downstream: RequestIdentity,
        /// Source request currently owning it.
        owner: RequestIdentity,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CorrelationStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the error for the caller's retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::DownstreamClaimed { .. } => RetryPolicy::NonRetryable,
            Self::Persistence(_) => RetryPolicy::Retryable { after: None },
        }
    }
}
