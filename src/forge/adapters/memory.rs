//! In-memory hosting adapter for tests and local deterministic runs.

use crate::correlation::domain::{ProjectRef, ProjectUrl, RequestIdentity};
use crate::forge::{
    domain::CommitSha,
    ports::{ForgeClient, ForgeError, ForgeResult},
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// A comment recorded by [`InMemoryForge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    /// Request the comment was posted on.
    pub request: RequestIdentity,
    /// Comment body.
    pub body: String,
}

/// In-memory hosting adapter.
///
/// Projects and head commits are registered up front; comments and
/// closures are recorded for later inspection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryForge {
    state: Arc<RwLock<InMemoryForgeState>>,
}

#[derive(Debug, Default)]
struct InMemoryForgeState {
    projects: HashMap<ProjectUrl, ProjectRef>,
    head_commits: HashMap<String, CommitSha>,
    comments: Vec<PostedComment>,
    closed: HashSet<String>,
}

impl InMemoryForge {
    /// Creates an empty in-memory forge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project so it can be resolved from its URL.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn add_project(&self, project: ProjectRef) -> ForgeResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| ForgeError::transport(std::io::Error::other(err.to_string())))?;
        state
            .projects
            .insert(project.project_url().clone(), project);
        Ok(())
    }

    /// Sets the head commit reported for a request.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn set_head_commit(&self, request: &RequestIdentity, sha: CommitSha) -> ForgeResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| ForgeError::transport(std::io::Error::other(err.to_string())))?;
        state.head_commits.insert(request.to_canonical(), sha);
        Ok(())
    }

    /// Returns every comment posted so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn comments(&self) -> ForgeResult<Vec<PostedComment>> {
        let state = self
            .state
            .read()
            .map_err(|err| ForgeError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.comments.clone())
    }

    /// Returns the comments posted on one request.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn comments_on(&self, request: &RequestIdentity) -> ForgeResult<Vec<String>> {
        Ok(self
            .comments()?
            .into_iter()
            .filter(|comment| comment.request == *request)
            .map(|comment| comment.body)
            .collect())
    }

    /// Returns `true` when the request has been closed.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn is_closed(&self, request: &RequestIdentity) -> ForgeResult<bool> {
        let state = self
            .state
            .read()
            .map_err(|err| ForgeError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.closed.contains(&request.to_canonical()))
    }
}

#[async_trait]
impl ForgeClient for InMemoryForge {
    async fn resolve_project(&self, project_url: &ProjectUrl) -> ForgeResult<Option<ProjectRef>> {
        let state = self
            .state
            .read()
            .map_err(|err| ForgeError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.projects.get(project_url).cloned())
    }

    async fn comment(&self, request: &RequestIdentity, body: &str) -> ForgeResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| ForgeError::transport(std::io::Error::other(err.to_string())))?;
        state.comments.push(PostedComment {
            request: request.clone(),
            body: body.to_owned(),
        });
        Ok(())
    }

    async fn close(&self, request: &RequestIdentity) -> ForgeResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| ForgeError::transport(std::io::Error::other(err.to_string())))?;
        state.closed.insert(request.to_canonical());
        Ok(())
    }

    async fn head_commit(&self, request: &RequestIdentity) -> ForgeResult<CommitSha> {
        let state = self
            .state
            .read()
            .map_err(|err| ForgeError::transport(std::io::Error::other(err.to_string())))?;
        state
            .head_commits
            .get(&request.to_canonical())
            .cloned()
            .ok_or_else(|| ForgeError::NotFound(format!("head commit of {request}")))
    }
}
