//! Domain model for relaying downstream CI results to source requests.

mod error;
mod event;
mod state;

pub use error::StatusDomainError;
pub use event::{
    FlagEvent, MERGE_REQUEST_PIPELINE_SOURCE, PIPELINE_CHECK_NAME, PipelineEvent, StatusReport,
    StatusSource,
};
pub use state::CommitState;
