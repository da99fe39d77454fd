//! Task-level plumbing shared by the handlers.
//!
//! Every handler returns a [`TaskOutcome`]; the [`JobDispatcher`] wraps it
//! with the originating event into [`JobResults`] for the task runner, which
//! owns queueing and retries.

mod dispatcher;
mod outcome;
mod retry;
mod task_name;

pub use dispatcher::{HardlyEvent, JobDispatcher, JobResults};
pub use outcome::{
    DETAIL_ACTION, DETAIL_ANOMALY, DETAIL_DELIVERY, DETAIL_DOWNSTREAM, DETAIL_ERROR,
    DETAIL_REASON, DETAIL_RETRYABLE, TaskOutcome,
};
pub use retry::RetryPolicy;
pub use task_name::{ParseTaskNameError, TaskName};
