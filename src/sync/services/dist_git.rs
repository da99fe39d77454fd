//! Service turning source-git merge-request events into dist-git requests.

use super::notices::{self, NoticeRenderError, SourceChange};
use crate::correlation::{
    domain::{
        CorrelationDomainError, LinkOutcome, ProjectUrl, RequestIdentity, RequestNumber,
        SourceRecord,
    },
    ports::{CorrelationStore, CorrelationStoreError},
};
use crate::forge::ports::{ForgeClient, ForgeError};
use crate::jobs::{DETAIL_ACTION, DETAIL_ANOMALY, DETAIL_DOWNSTREAM, RetryPolicy, TaskOutcome};
use crate::sync::{
    domain::{
        MergeRequestEvent, PackageConfig, SyncEventKind, SyncReleaseRequest, TargetRule,
        fix_bugzilla_refs, is_handled,
    },
    ports::{ContentSync, ContentSyncError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Service-level errors for dist-git synchronization.
#[derive(Debug, Error)]
pub enum DistGitSyncError {
    /// The event carries an invalid request identity.
    #[error(transparent)]
    Identity(#[from] CorrelationDomainError),
    /// The source project URL is not known to the hosting system.
    #[error("source project {0} cannot be resolved")]
    UnknownProject(String),
    /// Correlation persistence failed.
    #[error(transparent)]
    Store(#[from] CorrelationStoreError),
    /// A hosting API call failed.
    #[error(transparent)]
    Forge(#[from] ForgeError),
    /// Content sync failed.
    #[error(transparent)]
    ContentSync(#[from] ContentSyncError),
    /// A comment template failed to render.
    #[error(transparent)]
    Notice(#[from] NoticeRenderError),
}

impl DistGitSyncError {
    /// Classifies the error for the caller's retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Identity(_) | Self::UnknownProject(_) | Self::Notice(_) => {
                RetryPolicy::NonRetryable
            }
            Self::Store(err) => err.retry_policy(),
            Self::Forge(err) => err.retry_policy(),
            Self::ContentSync(err) => err.retry_policy(),
        }
    }
}

/// Result type for dist-git synchronization.
pub type DistGitSyncResult<T> = Result<T, DistGitSyncError>;

/// Link state resolved once per handled event.
struct LinkContext {
    source: SourceRecord,
    downstream: Option<RequestIdentity>,
}

/// Dist-git synchronization service.
///
/// Holds no per-event state: every call resolves its own link context and
/// the correlation store is the only shared mutable resource.
#[derive(Clone)]
pub struct DistGitSyncService<S, F, P, C>
where
    S: CorrelationStore,
    F: ForgeClient,
    P: ContentSync,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    forge: Arc<F>,
    content: Arc<P>,
    clock: Arc<C>,
    target_rules: Vec<TargetRule>,
    deployment_project: String,
}

impl<S, F, P, C> DistGitSyncService<S, F, P, C>
where
    S: CorrelationStore,
    F: ForgeClient,
    P: ContentSync,
    C: Clock + Send + Sync,
{
    /// Creates a service that handles every target.
    #[must_use]
    pub const fn new(store: Arc<S>, forge: Arc<F>, content: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            store,
            forge,
            content,
            clock,
            target_rules: Vec::new(),
            deployment_project: String::new(),
        }
    }

    /// Restricts the service to the given merge-request targets.
    #[must_use]
    pub fn with_target_rules(mut self, rules: Vec<TargetRule>) -> Self {
        self.target_rules = rules;
        self
    }

    /// Sets the deployment project name (`stream`, `fedora-source-git`, ...).
    #[must_use]
    pub fn with_deployment_project(mut self, project: impl Into<String>) -> Self {
        self.deployment_project = project.into();
        self
    }

    /// Handles one merge-request event on a source repository.
    ///
    /// Out-of-scope events (unhandled target, missing package configuration,
    /// nothing to close) succeed with a `reason` detail and change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`DistGitSyncError`] when the event identity is invalid or a
    /// collaborator fails; nothing is retried here.
    pub async fn handle(
        &self,
        event: &MergeRequestEvent,
        package: Option<&PackageConfig>,
    ) -> DistGitSyncResult<TaskOutcome> {
        let target_repo = event.target_repo();
        if !is_handled(&target_repo, &event.target_repo_branch, &self.target_rules) {
            debug!(
                target_repo = %target_repo,
                target_branch = %event.target_repo_branch,
                "Not creating/updating a dist-git MR for unhandled target"
            );
            return Ok(TaskOutcome::skipped(format!(
                "target {target_repo}:{} is not handled",
                event.target_repo_branch
            )));
        }

        let context = self.resolve_link_context(event).await?;
        match context.downstream {
            Some(downstream) => {
                self.handle_linked(event, &context.source, &downstream, package)
                    .await
            }
            None => self.handle_unlinked(event, &context.source, package).await,
        }
    }

    async fn resolve_link_context(
        &self,
        event: &MergeRequestEvent,
    ) -> DistGitSyncResult<LinkContext> {
        let project_url = ProjectUrl::new(event.project_url.as_str())?;
        let project = self
            .forge
            .resolve_project(&project_url)
            .await?
            .ok_or_else(|| DistGitSyncError::UnknownProject(event.project_url.clone()))?;
        let identity = RequestIdentity::new(project, RequestNumber::new(event.identifier)?);

        let source = self
            .store
            .get_or_create_source_record(&identity, self.clock.utc())
            .await?;
        let downstream = self.store.lookup_downstream_by_source(&source).await?;
        Ok(LinkContext { source, downstream })
    }

    async fn handle_linked(
        &self,
        event: &MergeRequestEvent,
        source: &SourceRecord,
        downstream: &RequestIdentity,
        package: Option<&PackageConfig>,
    ) -> DistGitSyncResult<TaskOutcome> {
        info!(
            source = %source.identity(),
            downstream = %downstream,
            action = %event.action,
            "Source-git MR already has a corresponding dist-git MR"
        );
        let outcome =
            TaskOutcome::success().with_detail(DETAIL_DOWNSTREAM, downstream.to_canonical());

        let change = match event.kind() {
            SyncEventKind::Opened => {
                // A replayed webhook. A new dist-git MR needs the old link removed first.
                error!(
                    source = %source.identity(),
                    downstream = %downstream,
                    "Source-git MR opened again while already linked"
                );
                self.post_already_linked(event, downstream).await?;
                return Ok(outcome.with_detail(
                    DETAIL_ANOMALY,
                    "source request opened again while already linked",
                ));
            }
            SyncEventKind::Closed => {
                self.forge.close(downstream).await?;
                SourceChange::Closed
            }
            // Hosting clients expose no reopen call, so only the notice is mirrored.
            SyncEventKind::Reopened => SourceChange::Reopened,
            SyncEventKind::Updated { has_code_change } => {
                if has_code_change {
                    self.resync(event, source, package).await?;
                }
                SourceChange::Updated
            }
        };

        let notice = notices::source_changed(&event.url, change)?;
        info!(downstream = %downstream, notice = %notice, "Mirroring source-git MR change");
        self.forge.comment(downstream, &notice).await?;
        Ok(outcome.with_detail(DETAIL_ACTION, event.action.as_str()))
    }

    async fn resync(
        &self,
        event: &MergeRequestEvent,
        source: &SourceRecord,
        package: Option<&PackageConfig>,
    ) -> DistGitSyncResult<()> {
        let Some(package_config) = package else {
            debug!(source = %source.identity(), "No package config found, skipping re-sync");
            return Ok(());
        };
        let request = self.build_sync_request(event, package_config)?;
        if self.content.sync_release(&request).await?.is_none() {
            debug!(source = %source.identity(), "Content sync had nothing to push");
        }
        Ok(())
    }

    async fn handle_unlinked(
        &self,
        event: &MergeRequestEvent,
        source: &SourceRecord,
        package: Option<&PackageConfig>,
    ) -> DistGitSyncResult<TaskOutcome> {
        if event.kind() == SyncEventKind::Closed {
            debug!(source = %source.identity(), "Closed source-git MR has no dist-git MR");
            return Ok(TaskOutcome::skipped(
                "source request closed without a dist-git request",
            ));
        }
        let Some(package_config) = package else {
            debug!(source = %source.identity(), "No package config found");
            return Ok(TaskOutcome::skipped("no package config"));
        };

        let branches = self.content.downstream_branches(package_config).await?;
        if !branches.contains(&event.target_repo_branch) {
            let comment = notices::missing_branch(&event.target_repo_branch, &event.target_repo())?;
            info!(source = %source.identity(), "{comment}");
            self.forge.comment(source.identity(), &comment).await?;
            return Ok(TaskOutcome::success().with_detail(DETAIL_ACTION, "missing_branch"));
        }

        info!(
            source = %source.identity(),
            url = %event.url,
            "About to create a dist-git MR from source-git MR"
        );
        let request = self.build_sync_request(event, package_config)?;
        let Some(created) = self.content.sync_release(&request).await? else {
            debug!(source = %source.identity(), "Content sync produced no dist-git MR");
            return Ok(TaskOutcome::skipped("content sync produced no downstream request"));
        };

        let outcome = self
            .store
            .get_or_create_link(source, &created.identity, self.clock.utc())
            .await?;
        match outcome {
            LinkOutcome::Created(link) => {
                let comment = notices::confirmation(
                    link.downstream().request_number().value(),
                    &created.url,
                )?;
                self.forge.comment(source.identity(), &comment).await?;
                info!(
                    source = %source.identity(),
                    downstream = %link.downstream(),
                    "Linked source-git MR to new dist-git MR"
                );
                Ok(TaskOutcome::success()
                    .with_detail(DETAIL_ACTION, "created")
                    .with_detail(DETAIL_DOWNSTREAM, link.downstream().to_canonical()))
            }
            LinkOutcome::Existing(link) => {
                warn!(
                    source = %source.identity(),
                    linked = %link.downstream(),
                    synced = %created.identity,
                    "Another worker linked this source-git MR first"
                );
                self.post_already_linked(event, link.downstream()).await?;
                Ok(TaskOutcome::success()
                    .with_detail(DETAIL_DOWNSTREAM, link.downstream().to_canonical())
                    .with_detail(DETAIL_ANOMALY, "lost link creation race"))
            }
        }
    }

    async fn post_already_linked(
        &self,
        event: &MergeRequestEvent,
        downstream: &RequestIdentity,
    ) -> DistGitSyncResult<()> {
        let notice = notices::already_linked(&event.url)?;
        self.forge.comment(downstream, &notice).await?;
        Ok(())
    }

    fn build_sync_request(
        &self,
        event: &MergeRequestEvent,
        package: &PackageConfig,
    ) -> DistGitSyncResult<SyncReleaseRequest> {
        let description = notices::downstream_description(
            &fix_bugzilla_refs(&event.description),
            &event.url,
            self.deployment_project.starts_with("stream"),
        )?;
        Ok(SyncReleaseRequest {
            package: package.clone(),
            dist_git_branch: event.target_repo_branch.clone(),
            title: event.title.clone(),
            description,
            local_branch_suffix: format!("src-{}", event.identifier),
            source_project_url: event.source_project_url.clone(),
            upstream_fetch_url: event.project_url.clone(),
            commit_sha: event.commit_sha.clone(),
            mark_commit_origin: true,
            add_new_sources: false,
            sync_default_files: false,
        })
    }
}
