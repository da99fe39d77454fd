//! Inbound merge-request event and its classification.

use super::SyncDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Merge-request action reported by the source hosting system.
///
/// Both the imperative (`open`) and past-tense (`opened`) spellings are
/// accepted; the imperative form is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MergeRequestAction {
    /// The request was opened.
    Opened,
    /// New commits or metadata were pushed.
    Updated,
    /// A closed request was reopened.
    Reopened,
    /// The request was closed or merged away.
    Closed,
}

impl MergeRequestAction {
    /// Returns the action in its wire format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opened => "open",
            Self::Updated => "update",
            Self::Reopened => "reopen",
            Self::Closed => "close",
        }
    }
}

impl TryFrom<&str> for MergeRequestAction {
    type Error = SyncDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" | "opened" => Ok(Self::Opened),
            "update" | "updated" => Ok(Self::Updated),
            "reopen" | "reopened" => Ok(Self::Reopened),
            "close" | "closed" => Ok(Self::Closed),
            _ => Err(SyncDomainError::UnknownAction(value.to_owned())),
        }
    }
}

impl TryFrom<String> for MergeRequestAction {
    type Error = SyncDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<MergeRequestAction> for String {
    fn from(action: MergeRequestAction) -> Self {
        action.as_str().to_owned()
    }
}

impl fmt::Display for MergeRequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event kind driving the synchronization state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEventKind {
    /// The source request was opened.
    Opened,
    /// The source request changed.
    Updated {
        /// `true` when the push carried new commits.
        has_code_change: bool,
    },
    /// The source request was reopened.
    Reopened,
    /// The source request was closed.
    Closed,
}

/// Merge-request event on a source repository, as delivered by the event
/// parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequestEvent {
    /// What happened to the request.
    pub action: MergeRequestAction,
    /// Request number within the source project.
    pub identifier: u64,
    /// Request title.
    pub title: String,
    /// Request description (may be empty).
    #[serde(default)]
    pub description: String,
    /// Web URL of the request.
    pub url: String,
    /// Web URL of the source-git project that owns the request.
    pub project_url: String,
    /// Web URL of the project the request's commits come from (may be a fork).
    pub source_project_url: String,
    /// Namespace of the repository the request targets.
    pub target_repo_namespace: String,
    /// Name of the repository the request targets.
    pub target_repo_name: String,
    /// Branch the request targets.
    pub target_repo_branch: String,
    /// Previous head revision; present only when the update pushed commits.
    #[serde(default)]
    pub oldrev: Option<String>,
    /// Head commit of the request.
    #[serde(default)]
    pub commit_sha: Option<String>,
}

impl MergeRequestEvent {
    /// Returns `namespace/name` of the targeted repository.
    #[must_use]
    pub fn target_repo(&self) -> String {
        format!("{}/{}", self.target_repo_namespace, self.target_repo_name)
    }

    /// Returns `true` when the event carries a previous revision.
    #[must_use]
    pub fn has_code_change(&self) -> bool {
        self.oldrev
            .as_deref()
            .is_some_and(|rev| !rev.trim().is_empty())
    }

    /// Classifies the event for the state machine.
    #[must_use]
    pub fn kind(&self) -> SyncEventKind {
        match self.action {
            MergeRequestAction::Opened => SyncEventKind::Opened,
            MergeRequestAction::Updated => SyncEventKind::Updated {
                has_code_change: self.has_code_change(),
            },
            MergeRequestAction::Reopened => SyncEventKind::Reopened,
            MergeRequestAction::Closed => SyncEventKind::Closed,
        }
    }
}
