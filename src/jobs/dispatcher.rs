//! Routing of inbound events to the sync and status services.

use super::{DETAIL_ERROR, RetryPolicy, TaskName, TaskOutcome};
use crate::correlation::ports::CorrelationStore;
use crate::forge::ports::ForgeClient;
use crate::status::{
    domain::{FlagEvent, PipelineEvent, StatusSource},
    ports::StatusReporter,
    services::StatusRelayService,
};
use crate::sync::{
    domain::{MergeRequestEvent, PackageConfig},
    ports::ContentSync,
    services::DistGitSyncService,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Event accepted by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum HardlyEvent {
    /// Merge-request activity on a source-git repository.
    MergeRequest {
        /// The merge-request event.
        event: MergeRequestEvent,
        /// Package configuration of the source repository, when resolvable.
        #[serde(default)]
        package_config: Option<PackageConfig>,
    },
    /// Pipeline update on a dist-git GitLab project.
    Pipeline(PipelineEvent),
    /// Flag update on a dist-git Pagure pull request.
    Flag(FlagEvent),
}

impl HardlyEvent {
    /// Returns the task that handles this event.
    #[must_use]
    pub const fn task_name(&self) -> TaskName {
        match self {
            Self::MergeRequest { .. } => TaskName::DistGitPr,
            Self::Pipeline(_) => TaskName::SyncFromGitlabMr,
            Self::Flag(_) => TaskName::SyncFromPagurePr,
        }
    }
}

/// Result record handed back to the task runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResults {
    /// Task that handled the event.
    pub task: TaskName,
    /// Outcome of the handler.
    pub job: TaskOutcome,
    /// The event as received.
    pub event: serde_json::Value,
}

/// Dispatches events to the service owning them.
///
/// Merge-request events always reach the sync service; there is no
/// per-package job configuration gate.
#[derive(Clone)]
pub struct JobDispatcher<S, F, P, R, C>
where
    S: CorrelationStore,
    F: ForgeClient,
    P: ContentSync,
    R: StatusReporter,
    C: Clock + Send + Sync,
{
    sync: DistGitSyncService<S, F, P, C>,
    relay: StatusRelayService<S, F, R>,
}

impl<S, F, P, R, C> JobDispatcher<S, F, P, R, C>
where
    S: CorrelationStore,
    F: ForgeClient,
    P: ContentSync,
    R: StatusReporter,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher over the two services.
    #[must_use]
    pub const fn new(
        sync: DistGitSyncService<S, F, P, C>,
        relay: StatusRelayService<S, F, R>,
    ) -> Self {
        Self { sync, relay }
    }

    /// Runs the handler for one event.
    ///
    /// Handler errors are folded into a failed [`TaskOutcome`] carrying the
    /// error message and whether the runner may retry it.
    pub async fn dispatch(&self, event: &HardlyEvent) -> JobResults {
        let task = event.task_name();
        let result = match event {
            HardlyEvent::MergeRequest {
                event: merge_request,
                package_config,
            } => self
                .sync
                .handle(merge_request, package_config.as_ref())
                .await
                .map_err(|err| (err.to_string(), err.retry_policy())),
            HardlyEvent::Pipeline(pipeline) => self
                .relay
                .relay(&StatusSource::Gitlab(pipeline.clone()))
                .await
                .map_err(|err| (err.to_string(), err.retry_policy())),
            HardlyEvent::Flag(flag) => self
                .relay
                .relay(&StatusSource::Pagure(flag.clone()))
                .await
                .map_err(|err| (err.to_string(), err.retry_policy())),
        };
        let job = result.unwrap_or_else(|(message, policy)| failed(task, &message, policy));

        JobResults {
            task,
            job,
            event: echo(task, event),
        }
    }
}

fn failed(task: TaskName, message: &str, policy: RetryPolicy) -> TaskOutcome {
    error!(
        task = %task,
        error = %message,
        retryable = policy.is_retryable(),
        "Task failed"
    );
    let outcome = TaskOutcome::failure(message, policy.is_retryable());
    match policy {
        RetryPolicy::Retryable { after: Some(delay) } => {
            outcome.with_detail("retry_after_ms", delay.as_millis().to_string())
        }
        RetryPolicy::Retryable { after: None } | RetryPolicy::NonRetryable => outcome,
    }
}

fn echo(task: TaskName, event: &HardlyEvent) -> serde_json::Value {
    serde_json::to_value(event).unwrap_or_else(|err| {
        warn!(task = %task, error = %err, "Event could not be echoed into results");
        serde_json::Value::Null
    })
}
