//! Symbolic task names used as dispatch keys by the task runner.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a task name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task name: {0}")]
pub struct ParseTaskNameError(pub String);

/// Closed set of task names this crate handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskName {
    /// Create or update the dist-git request for a source-git merge request.
    #[serde(rename = "task.run_dist_git_pr_handler")]
    DistGitPr,
    /// Relay a dist-git GitLab pipeline result to the source-git request.
    #[serde(rename = "task.run_sync_from_gitlab_mr_handler")]
    SyncFromGitlabMr,
    /// Relay a dist-git Pagure flag to the source-git request.
    #[serde(rename = "task.run_sync_from_pagure_pr_handler")]
    SyncFromPagurePr,
}

impl TaskName {
    /// Returns the task name in its wire format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DistGitPr => "task.run_dist_git_pr_handler",
            Self::SyncFromGitlabMr => "task.run_sync_from_gitlab_mr_handler",
            Self::SyncFromPagurePr => "task.run_sync_from_pagure_pr_handler",
        }
    }
}

impl TryFrom<&str> for TaskName {
    type Error = ParseTaskNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "task.run_dist_git_pr_handler" => Ok(Self::DistGitPr),
            "task.run_sync_from_gitlab_mr_handler" => Ok(Self::SyncFromGitlabMr),
            "task.run_sync_from_pagure_pr_handler" => Ok(Self::SyncFromPagurePr),
            _ => Err(ParseTaskNameError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
