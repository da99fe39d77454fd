//! Normalized commit status and the vocabularies mapped onto it.

use super::StatusDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commit status reported on the source request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    /// Checks have not started yet.
    Pending,
    /// Checks are running.
    Running,
    /// Checks passed.
    Success,
    /// Checks failed.
    Failure,
    /// Checks could not run.
    Error,
}

impl CommitState {
    /// Maps a GitLab pipeline status onto a commit state.
    ///
    /// # Errors
    ///
    /// Returns [`StatusDomainError::UnknownStatus`] for values outside the
    /// GitLab pipeline vocabulary.
    pub fn from_pipeline_status(status: &str) -> Result<Self, StatusDomainError> {
        match status {
            "pending" | "created" | "waiting_for_resource" | "preparing" | "scheduled"
            | "manual" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "success" | "skipped" => Ok(Self::Success),
            "failed" | "canceled" => Ok(Self::Failure),
            _ => Err(StatusDomainError::UnknownStatus {
                vocabulary: "pipeline",
                status: status.to_owned(),
            }),
        }
    }

    /// Maps a Pagure pull-request flag status onto a commit state.
    ///
    /// # Errors
    ///
    /// Returns [`StatusDomainError::UnknownStatus`] for values outside the
    /// Pagure flag vocabulary.
    pub fn from_flag_status(status: &str) -> Result<Self, StatusDomainError> {
        match status {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "failure" | "canceled" => Ok(Self::Failure),
            _ => Err(StatusDomainError::UnknownStatus {
                vocabulary: "flag",
                status: status.to_owned(),
            }),
        }
    }

    /// Returns the state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CommitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
