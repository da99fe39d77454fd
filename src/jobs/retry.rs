//! Retry classification for failed units of work.
//!
//! The engine never retries on its own; errors report a [`RetryPolicy`] and
//! the surrounding task runner applies its bounded back-off.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Whether an error condition is safe to retry and, if so, after what delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    Retryable {
        /// Minimum back-off before the next attempt. `None` means apply the
        /// caller's own back-off schedule.
        after: Option<Duration>,
    },
    /// The operation must not be retried.
    NonRetryable,
}

impl RetryPolicy {
    /// Returns `true` for [`RetryPolicy::Retryable`].
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Retryable { .. })
    }
}
