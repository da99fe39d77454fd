//! In-memory content-sync adapter for tests and local deterministic runs.

use crate::correlation::domain::{ProjectRef, RequestIdentity, RequestNumber};
use crate::sync::{
    domain::{DownstreamRequest, PackageConfig, SyncReleaseRequest},
    ports::{ContentSync, ContentSyncError, ContentSyncResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory content-sync adapter.
///
/// Packages are registered with their dist-git project and branches. Each
/// distinct local branch opens one downstream request, numbered from 1;
/// repeated syncs of the same branch update that request.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentSync {
    state: Arc<RwLock<InMemoryContentSyncState>>,
}

#[derive(Debug, Default)]
struct InMemoryContentSyncState {
    packages: HashMap<String, RegisteredPackage>,
    requests: Vec<SyncReleaseRequest>,
    opened: HashMap<String, DownstreamRequest>,
    last_number: u64,
}

#[derive(Debug, Clone)]
struct RegisteredPackage {
    project: ProjectRef,
    branches: Vec<String>,
}

impl InMemoryContentSync {
    /// Creates an adapter with no registered packages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dist-git package repository and its branches.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn add_package<I, S>(
        &self,
        package_name: &str,
        project: ProjectRef,
        branches: I,
    ) -> ContentSyncResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self
            .state
            .write()
            .map_err(|err| ContentSyncError::transport(std::io::Error::other(err.to_string())))?;
        state.packages.insert(
            package_name.to_owned(),
            RegisteredPackage {
                project,
                branches: branches.into_iter().map(Into::into).collect(),
            },
        );
        Ok(())
    }

    /// Returns every sync request received so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn requests(&self) -> ContentSyncResult<Vec<SyncReleaseRequest>> {
        let state = self
            .state
            .read()
            .map_err(|err| ContentSyncError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.requests.clone())
    }
}

#[async_trait]
impl ContentSync for InMemoryContentSync {
    async fn downstream_branches(
        &self,
        package: &PackageConfig,
    ) -> ContentSyncResult<Vec<String>> {
        let state = self
            .state
            .read()
            .map_err(|err| ContentSyncError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state
            .packages
            .get(&package.downstream_package_name)
            .map(|registered| registered.branches.clone())
            .unwrap_or_default())
    }

    async fn sync_release(
        &self,
        request: &SyncReleaseRequest,
    ) -> ContentSyncResult<Option<DownstreamRequest>> {
        let mut state = self
            .state
            .write()
            .map_err(|err| ContentSyncError::transport(std::io::Error::other(err.to_string())))?;
        let package_name = &request.package.downstream_package_name;
        let registered = state.packages.get(package_name).cloned().ok_or_else(|| {
            ContentSyncError::Rejected(format!("unknown dist-git package {package_name}"))
        })?;
        if !registered.branches.contains(&request.dist_git_branch) {
            return Err(ContentSyncError::Rejected(format!(
                "branch {} does not exist in {}",
                request.dist_git_branch,
                registered.project.full_repo_name()
            )));
        }
        state.requests.push(request.clone());

        let key = format!(
            "{package_name}:{}:{}",
            request.dist_git_branch, request.local_branch_suffix
        );
        if let Some(existing) = state.opened.get(&key) {
            return Ok(Some(existing.clone()));
        }

        let number = RequestNumber::new(state.last_number.saturating_add(1))
            .map_err(ContentSyncError::transport)?;
        state.last_number = number.value();
        let downstream = DownstreamRequest {
            url: format!(
                "{}/-/merge_requests/{number}",
                registered.project.project_url()
            ),
            identity: RequestIdentity::new(registered.project, number),
        };
        state.opened.insert(key, downstream.clone());
        Ok(Some(downstream))
    }
}
