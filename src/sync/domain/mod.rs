//! Domain model for source-git to dist-git request synchronization.

mod error;
mod event;
mod package;
mod references;
mod target;

pub use error::SyncDomainError;
pub use event::{MergeRequestAction, MergeRequestEvent, SyncEventKind};
pub use package::{DownstreamRequest, PackageConfig, SyncReleaseRequest};
pub use references::fix_bugzilla_refs;
pub use target::{TargetRule, is_handled};
