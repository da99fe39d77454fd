//! In-memory integration tests for dist-git request synchronization.

use super::helpers::{
    DIST_GIT_URL, Deployment, MR_URL, deployment, deployment_with, dist_git_request,
    merge_request, source_request,
};
use hardly::config::{ServiceConfig, TargetRuleConfig};
use hardly::jobs::{DETAIL_ACTION, DETAIL_ANOMALY, DETAIL_REASON, TaskName};
use hardly::sync::domain::MergeRequestAction;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn opened_request_is_mirrored_to_dist_git(deployment: Deployment) -> Result<(), eyre::Report> {
    let results = deployment
        .dispatcher
        .dispatch(&merge_request(MergeRequestAction::Opened))
        .await;

    eyre::ensure!(results.task == TaskName::DistGitPr, "unexpected task {}", results.task);
    eyre::ensure!(results.job.is_success(), "job failed: {:?}", results.job);
    eyre::ensure!(results.job.detail(DETAIL_ACTION) == Some("created"), "not created");
    eyre::ensure!(
        results.event["event_type"] == "merge_request",
        "event not echoed: {}",
        results.event
    );

    let requests = deployment.content.requests()?;
    let request = requests
        .first()
        .ok_or_else(|| eyre::eyre!("no sync request recorded"))?;
    eyre::ensure!(request.local_branch_suffix == "src-5", "wrong branch suffix");
    eyre::ensure!(
        request.description.starts_with(
            "Fix out-of-bounds read in the parser.\n\nResolves: bz#12345\n\n---\n"
        ),
        "description not rewritten: {}",
        request.description
    );
    eyre::ensure!(
        request
            .description
            .ends_with(&format!("[this source-git MR]({MR_URL}).")),
        "footer missing: {}",
        request.description
    );

    let comments = deployment.forge.comments_on(&source_request()?)?;
    eyre::ensure!(comments.len() == 1, "expected one comment, got {comments:?}");
    eyre::ensure!(
        comments.iter().all(|comment| comment
            .starts_with(&format!("[Dist-git MR #1]({DIST_GIT_URL}/-/merge_requests/1)"))),
        "confirmation does not link dist-git MR: {comments:?}"
    );
    eyre::ensure!(deployment.store.link_count()? == 1, "link not persisted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_open_keeps_single_link(deployment: Deployment) -> Result<(), eyre::Report> {
    let event = merge_request(MergeRequestAction::Opened);
    deployment.dispatcher.dispatch(&event).await;
    let replay = deployment.dispatcher.dispatch(&event).await;

    eyre::ensure!(replay.job.is_success(), "replay failed: {:?}", replay.job);
    eyre::ensure!(replay.job.detail(DETAIL_ANOMALY).is_some(), "anomaly not flagged");
    eyre::ensure!(deployment.content.requests()?.len() == 1, "content synced twice");
    eyre::ensure!(deployment.store.link_count()? == 1, "second link created");
    eyre::ensure!(
        deployment.forge.comments_on(&source_request()?)?.len() == 1,
        "confirmation posted twice"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn close_and_reopen_reuse_existing_link(deployment: Deployment) -> Result<(), eyre::Report> {
    for action in [
        MergeRequestAction::Opened,
        MergeRequestAction::Closed,
        MergeRequestAction::Reopened,
    ] {
        let results = deployment.dispatcher.dispatch(&merge_request(action)).await;
        eyre::ensure!(results.job.is_success(), "{action} failed: {:?}", results.job);
    }

    let downstream = dist_git_request(1)?;
    eyre::ensure!(deployment.forge.is_closed(&downstream)?, "dist-git MR not closed");
    eyre::ensure!(
        deployment.forge.comments_on(&downstream)?
            == vec![
                format!("[Source-git MR]({MR_URL}) has been closed."),
                format!("[Source-git MR]({MR_URL}) has been reopened."),
            ],
        "unexpected dist-git comments"
    );
    eyre::ensure!(deployment.store.link_count()? == 1, "link was not reused");
    eyre::ensure!(deployment.content.requests()?.len() == 1, "reopen re-created content");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_targets_gate_processing() -> Result<(), eyre::Report> {
    let config = ServiceConfig {
        merge_request_targets_handled: vec![TargetRuleConfig {
            repo: Some("packit-service/src/.+".to_owned()),
            branch: None,
        }],
        ..ServiceConfig::default()
    };
    let deployment = deployment_with(&config)?;

    let results = deployment
        .dispatcher
        .dispatch(&merge_request(MergeRequestAction::Opened))
        .await;

    eyre::ensure!(results.job.is_success(), "skip must succeed");
    eyre::ensure!(results.job.detail(DETAIL_REASON).is_some(), "no skip reason");
    eyre::ensure!(deployment.content.requests()?.is_empty(), "content synced");
    eyre::ensure!(deployment.store.link_count()? == 0, "link created");
    Ok(())
}
