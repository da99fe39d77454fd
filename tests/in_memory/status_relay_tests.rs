//! In-memory integration tests for CI status relaying.

use super::helpers::{Deployment, HEAD, deployment, merge_request, pipeline, source_request};
use hardly::jobs::{DETAIL_ERROR, DETAIL_REASON, DETAIL_RETRYABLE, TaskName};
use hardly::status::domain::CommitState;
use hardly::sync::domain::MergeRequestAction;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_dist_git_pipeline_marks_source_commit(
    deployment: Deployment,
) -> Result<(), eyre::Report> {
    deployment
        .dispatcher
        .dispatch(&merge_request(MergeRequestAction::Opened))
        .await;

    let results = deployment.dispatcher.dispatch(&pipeline("failed", 1)).await;

    eyre::ensure!(results.task == TaskName::SyncFromGitlabMr, "wrong task");
    eyre::ensure!(results.job.is_success(), "relay failed: {:?}", results.job);
    let recorded = deployment.reporter.recorded()?;
    let status = recorded
        .first()
        .ok_or_else(|| eyre::eyre!("no status published"))?;
    eyre::ensure!(status.request == source_request()?, "status on wrong request");
    eyre::ensure!(status.commit.as_str() == HEAD, "status on wrong commit");
    eyre::ensure!(status.report.state == CommitState::Failure, "wrong state");
    eyre::ensure!(
        status.report.description == "Changed status to failed",
        "wrong description: {}",
        status.report.description
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pipeline_without_link_is_ignored(deployment: Deployment) -> Result<(), eyre::Report> {
    let results = deployment.dispatcher.dispatch(&pipeline("success", 1)).await;

    eyre::ensure!(results.job.is_success(), "skip must succeed");
    eyre::ensure!(results.job.detail(DETAIL_REASON).is_some(), "no skip reason");
    eyre::ensure!(deployment.reporter.recorded()?.is_empty(), "status published");
    eyre::ensure!(deployment.store.link_count()? == 0, "relay created a link");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_pipeline_status_fails_without_retry(
    deployment: Deployment,
) -> Result<(), eyre::Report> {
    deployment
        .dispatcher
        .dispatch(&merge_request(MergeRequestAction::Opened))
        .await;

    let results = deployment.dispatcher.dispatch(&pipeline("exploded", 1)).await;

    eyre::ensure!(!results.job.is_success(), "unknown status must fail");
    eyre::ensure!(
        results.job.detail(DETAIL_RETRYABLE) == Some("false"),
        "unknown status must not be retried"
    );
    eyre::ensure!(
        results
            .job
            .detail(DETAIL_ERROR)
            .is_some_and(|error| error.contains("exploded")),
        "error does not name the status"
    );
    eyre::ensure!(deployment.reporter.recorded()?.is_empty(), "status published");
    Ok(())
}
