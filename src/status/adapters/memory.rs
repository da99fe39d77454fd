//! In-memory status reporter for tests and local deterministic runs.

use crate::correlation::domain::RequestIdentity;
use crate::forge::domain::CommitSha;
use crate::status::{
    domain::StatusReport,
    ports::{StatusDelivery, StatusReporter, StatusReporterError, StatusReporterResult},
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

/// A status recorded by [`InMemoryStatusReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStatus {
    /// Request the status was published on.
    pub request: RequestIdentity,
    /// Commit the status belongs to.
    pub commit: CommitSha,
    /// Published report.
    pub report: StatusReport,
    /// How the report was delivered.
    pub delivery: StatusDelivery,
}

/// In-memory status reporter.
///
/// Requests marked as fork-backed get their statuses as comment fallbacks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatusReporter {
    state: Arc<RwLock<InMemoryStatusReporterState>>,
}

#[derive(Debug, Default)]
struct InMemoryStatusReporterState {
    recorded: Vec<RecordedStatus>,
    comment_only: HashSet<String>,
}

impl InMemoryStatusReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes statuses on the request fall back to comments.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn deny_commit_status(&self, request: &RequestIdentity) -> StatusReporterResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StatusReporterError::transport(std::io::Error::other(err.to_string())))?;
        state.comment_only.insert(request.to_canonical());
        Ok(())
    }

    /// Returns every status published so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn recorded(&self) -> StatusReporterResult<Vec<RecordedStatus>> {
        let state = self
            .state
            .read()
            .map_err(|err| StatusReporterError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.recorded.clone())
    }
}

#[async_trait]
impl StatusReporter for InMemoryStatusReporter {
    async fn set_status(
        &self,
        request: &RequestIdentity,
        commit: &CommitSha,
        report: &StatusReport,
    ) -> StatusReporterResult<StatusDelivery> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StatusReporterError::transport(std::io::Error::other(err.to_string())))?;
        let delivery = if state.comment_only.contains(&request.to_canonical()) {
            StatusDelivery::CommentFallback
        } else {
            StatusDelivery::CommitStatus
        };
        state.recorded.push(RecordedStatus {
            request: request.clone(),
            commit: commit.clone(),
            report: report.clone(),
            delivery,
        });
        Ok(delivery)
    }
}
