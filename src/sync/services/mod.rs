//! Application services for dist-git synchronization.

mod dist_git;
mod notices;

pub use dist_git::{DistGitSyncError, DistGitSyncResult, DistGitSyncService};
pub use notices::{NoticeRenderError, SourceChange};
