//! Uniform result record returned by every handler.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Detail key explaining why an event needed no action.
pub const DETAIL_REASON: &str = "reason";
/// Detail key describing a tolerated anomaly (replayed webhook, lost race).
pub const DETAIL_ANOMALY: &str = "anomaly";
/// Detail key holding an error message.
pub const DETAIL_ERROR: &str = "error";
/// Detail key holding `"true"`/`"false"` for whether a failure may be retried.
pub const DETAIL_RETRYABLE: &str = "retryable";
/// Detail key holding the downstream request of a link.
pub const DETAIL_DOWNSTREAM: &str = "downstream";
/// Detail key holding the action the handler performed.
pub const DETAIL_ACTION: &str = "action";
/// Detail key describing how a status report was delivered.
pub const DETAIL_DELIVERY: &str = "delivery";

/// Result of one unit of work.
///
/// `success == true` with a [`DETAIL_REASON`] entry means "nothing to do";
/// callers distinguish that from real work only through the details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    success: bool,
    details: BTreeMap<String, String>,
}

impl TaskOutcome {
    /// Successful outcome with no details.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            success: true,
            details: BTreeMap::new(),
        }
    }

    /// Successful outcome for an out-of-scope event.
    #[must_use]
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::success().with_detail(DETAIL_REASON, reason)
    }

    /// Failed outcome carrying an error message.
    #[must_use]
    pub fn failure(error: impl Into<String>, retryable: bool) -> Self {
        Self {
            success: false,
            details: BTreeMap::new(),
        }
        .with_detail(DETAIL_ERROR, error)
        .with_detail(DETAIL_RETRYABLE, retryable.to_string())
    }

    /// Adds or replaces a detail entry.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns `true` when the unit of work succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns all details.
    #[must_use]
    pub const fn details(&self) -> &BTreeMap<String, String> {
        &self.details
    }

    /// Returns one detail value.
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}
