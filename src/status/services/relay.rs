//! Service relaying downstream CI results back to source requests.

use crate::correlation::{
    domain::RequestIdentity,
    ports::{CorrelationStore, CorrelationStoreError},
};
use crate::forge::ports::{ForgeClient, ForgeError};
use crate::jobs::{DETAIL_DELIVERY, DETAIL_DOWNSTREAM, RetryPolicy, TaskOutcome};
use crate::status::{
    domain::{PipelineEvent, StatusDomainError, StatusSource},
    ports::{StatusDelivery, StatusReporter, StatusReporterError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Detail key holding the source request a status was published on.
pub const DETAIL_SOURCE: &str = "source";

/// Service-level errors for status relaying.
#[derive(Debug, Error)]
pub enum StatusRelayError {
    /// The event status could not be normalized.
    #[error(transparent)]
    Domain(#[from] StatusDomainError),
    /// Correlation lookup failed.
    #[error(transparent)]
    Store(#[from] CorrelationStoreError),
    /// A hosting API call failed.
    #[error(transparent)]
    Forge(#[from] ForgeError),
    /// Publishing the status failed.
    #[error(transparent)]
    Reporter(#[from] StatusReporterError),
}

impl StatusRelayError {
    /// Classifies the error for the caller's retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Domain(_) => RetryPolicy::NonRetryable,
            Self::Store(err) => err.retry_policy(),
            Self::Forge(err) => err.retry_policy(),
            Self::Reporter(err) => err.retry_policy(),
        }
    }
}

/// Result type for status relaying.
pub type StatusRelayResult<T> = Result<T, StatusRelayError>;

/// Status relay service.
///
/// Reads correlation links but never creates them.
#[derive(Clone)]
pub struct StatusRelayService<S, F, R>
where
    S: CorrelationStore,
    F: ForgeClient,
    R: StatusReporter,
{
    store: Arc<S>,
    forge: Arc<F>,
    reporter: Arc<R>,
}

impl<S, F, R> StatusRelayService<S, F, R>
where
    S: CorrelationStore,
    F: ForgeClient,
    R: StatusReporter,
{
    /// Creates a new status relay service.
    #[must_use]
    pub const fn new(store: Arc<S>, forge: Arc<F>, reporter: Arc<R>) -> Self {
        Self {
            store,
            forge,
            reporter,
        }
    }

    /// Publishes a downstream status on the linked source request.
    ///
    /// Events whose downstream request cannot be identified, or that have no
    /// linked source request, succeed with a `reason` detail.
    ///
    /// # Errors
    ///
    /// Returns [`StatusRelayError`] when the status is outside the known
    /// vocabulary or a collaborator fails.
    pub async fn relay(&self, source: &StatusSource) -> StatusRelayResult<TaskOutcome> {
        let Some(downstream) = self.downstream_identity(source).await? else {
            debug!(forge = source.forge_name(), "No dist-git request derivable from event");
            return Ok(TaskOutcome::skipped("downstream request not identifiable"));
        };
        let Some(origin) = self.store.lookup_source_by_downstream(&downstream).await? else {
            debug!(downstream = %downstream, "Source-git MR for dist-git MR not found");
            return Ok(TaskOutcome::skipped("no linked source request"));
        };

        let report = source.report()?;
        // A commit pushed before the pipeline ended gets this report until its
        // own pipeline finishes.
        let head = self.forge.head_commit(&origin).await?;
        let delivery = self.reporter.set_status(&origin, &head, &report).await?;
        info!(
            source = %origin,
            downstream = %downstream,
            state = %report.state,
            delivery = delivery.as_str(),
            "Relayed dist-git status to source-git MR"
        );

        if delivery == StatusDelivery::CommentFallback {
            debug!(source = %origin, "Commit status not permitted, posted a comment instead");
        }
        Ok(TaskOutcome::success()
            .with_detail(DETAIL_SOURCE, origin.to_canonical())
            .with_detail(DETAIL_DOWNSTREAM, downstream.to_canonical())
            .with_detail(DETAIL_DELIVERY, delivery.as_str()))
    }

    async fn downstream_identity(
        &self,
        source: &StatusSource,
    ) -> StatusRelayResult<Option<RequestIdentity>> {
        match source {
            StatusSource::Pagure(flag) => Ok(flag.pull_request.clone()),
            StatusSource::Gitlab(pipeline) => self.pipeline_request(pipeline).await,
        }
    }

    async fn pipeline_request(
        &self,
        pipeline: &PipelineEvent,
    ) -> StatusRelayResult<Option<RequestIdentity>> {
        let Some((project_url, number)) = pipeline.merge_request_ref() else {
            return Ok(None);
        };
        // The pipeline project may be either side of the request, so the
        // project is taken from the merge request URL.
        let project = self.forge.resolve_project(&project_url).await?;
        Ok(project.map(|resolved| RequestIdentity::new(resolved, number)))
    }
}
