//! Downstream CI events and the status report derived from them.

use super::{CommitState, StatusDomainError};
use crate::correlation::domain::{ProjectUrl, RequestIdentity, RequestNumber};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Check name used for relayed GitLab pipelines.
pub const PIPELINE_CHECK_NAME: &str = "Dist-git MR CI Pipeline";

/// Pipeline `source` value of pipelines triggered by a merge request.
pub const MERGE_REQUEST_PIPELINE_SOURCE: &str = "merge_request_event";

#[expect(
    clippy::expect_used,
    reason = "the pattern is a compile-time constant"
)]
static MERGE_REQUEST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)/-/merge_requests/(\d+)$").expect("valid merge request URL pattern")
});

/// GitLab pipeline event on a dist-git project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// Pipeline status.
    pub status: String,
    /// Human-readable status detail.
    pub detailed_status: String,
    /// Web URL of the project running the pipeline.
    pub project_url: String,
    /// Pipeline identifier.
    pub pipeline_id: u64,
    /// What triggered the pipeline.
    pub source: String,
    /// Web URL of the triggering merge request, if any.
    #[serde(default)]
    pub merge_request_url: Option<String>,
}

impl PipelineEvent {
    /// Extracts the downstream project URL and request number from the
    /// triggering merge request.
    ///
    /// Returns `None` unless the pipeline was triggered by a merge request
    /// whose URL has the `<project>/-/merge_requests/<n>` shape.
    #[must_use]
    pub fn merge_request_ref(&self) -> Option<(ProjectUrl, RequestNumber)> {
        if self.source != MERGE_REQUEST_PIPELINE_SOURCE {
            return None;
        }
        let captures = MERGE_REQUEST_URL.captures(self.merge_request_url.as_deref()?)?;
        let project_url = ProjectUrl::new(captures.get(1)?.as_str()).ok()?;
        let number = captures.get(2)?.as_str().parse::<u64>().ok()?;
        Some((project_url, RequestNumber::new(number).ok()?))
    }

    fn report(&self) -> Result<StatusReport, StatusDomainError> {
        Ok(StatusReport {
            state: CommitState::from_pipeline_status(&self.status)?,
            description: format!("Changed status to {}", self.detailed_status),
            check_name: PIPELINE_CHECK_NAME.to_owned(),
            url: format!("{}/-/pipelines/{}", self.project_url, self.pipeline_id),
        })
    }
}

/// Pagure pull-request flag event on a dist-git project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagEvent {
    /// Flag status.
    pub status: String,
    /// Flag comment.
    pub comment: String,
    /// Account that set the flag.
    pub username: String,
    /// Link to the flag details.
    pub url: String,
    /// Flagged pull request, when the event parser resolved it.
    #[serde(default)]
    pub pull_request: Option<RequestIdentity>,
}

impl FlagEvent {
    fn report(&self) -> Result<StatusReport, StatusDomainError> {
        Ok(StatusReport {
            state: CommitState::from_flag_status(&self.status)?,
            description: self.comment.clone(),
            check_name: self.username.clone(),
            url: self.url.clone(),
        })
    }
}

/// A downstream status event from one of the supported hosting systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "forge", rename_all = "snake_case")]
pub enum StatusSource {
    /// GitLab pipeline update.
    Gitlab(PipelineEvent),
    /// Pagure pull-request flag update.
    Pagure(FlagEvent),
}

impl StatusSource {
    /// Normalizes the event into the report posted on the source request.
    ///
    /// # Errors
    ///
    /// Returns [`StatusDomainError::UnknownStatus`] when the raw status is
    /// outside the source's vocabulary.
    pub fn report(&self) -> Result<StatusReport, StatusDomainError> {
        match self {
            Self::Gitlab(event) => event.report(),
            Self::Pagure(event) => event.report(),
        }
    }

    /// Returns the hosting system name.
    #[must_use]
    pub const fn forge_name(&self) -> &'static str {
        match self {
            Self::Gitlab(_) => "gitlab",
            Self::Pagure(_) => "pagure",
        }
    }
}

/// Commit status to set on the source request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Normalized state.
    pub state: CommitState,
    /// Short description.
    pub description: String,
    /// Name of the check the status belongs to.
    pub check_name: String,
    /// Link to the downstream details.
    pub url: String,
}
