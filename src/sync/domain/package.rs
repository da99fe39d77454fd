//! Package configuration and content-sync request types.

use crate::correlation::domain::RequestIdentity;
use serde::{Deserialize, Serialize};

/// Package configuration resolved for the source repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Name of the package in dist-git.
    pub downstream_package_name: String,
    /// Upstream project the source-git repository tracks.
    #[serde(default)]
    pub upstream_project_url: Option<String>,
    /// Path of the spec file inside the source-git repository.
    #[serde(default)]
    pub specfile_path: Option<String>,
}

impl PackageConfig {
    /// Creates a package configuration for a dist-git package.
    #[must_use]
    pub fn new(downstream_package_name: impl Into<String>) -> Self {
        Self {
            downstream_package_name: downstream_package_name.into(),
            upstream_project_url: None,
            specfile_path: None,
        }
    }

    /// Sets the upstream project URL.
    #[must_use]
    pub fn with_upstream_project_url(mut self, url: impl Into<String>) -> Self {
        self.upstream_project_url = Some(url.into());
        self
    }

    /// Sets the spec file path.
    #[must_use]
    pub fn with_specfile_path(mut self, path: impl Into<String>) -> Self {
        self.specfile_path = Some(path.into());
        self
    }
}

/// Parameters for one content-sync run towards dist-git.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReleaseRequest {
    /// Package being synchronized.
    pub package: PackageConfig,
    /// Dist-git branch receiving the change.
    pub dist_git_branch: String,
    /// Title of the downstream request.
    pub title: String,
    /// Body of the downstream request, including the maintainer footer.
    pub description: String,
    /// Suffix of the local branch the change is pushed from (`src-<n>`).
    pub local_branch_suffix: String,
    /// Project the commits are fetched from.
    pub source_project_url: String,
    /// Source-git project tags are fetched from.
    pub upstream_fetch_url: String,
    /// Commit to check out, when known.
    pub commit_sha: Option<String>,
    /// Record the source commit in the downstream commit message.
    pub mark_commit_origin: bool,
    /// Upload new source archives to the lookaside cache.
    pub add_new_sources: bool,
    /// Synchronize the default file set.
    pub sync_default_files: bool,
}

/// A downstream request created or updated by content sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownstreamRequest {
    /// Identity of the downstream request.
    pub identity: RequestIdentity,
    /// Web URL of the downstream request.
    pub url: String,
}
