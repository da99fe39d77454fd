//! When steps for dist-git synchronization BDD scenarios.

use super::world::{DIST_GIT_URL, SyncWorld, run_async};
use hardly::jobs::HardlyEvent;
use hardly::status::domain::PipelineEvent;
use hardly::sync::domain::MergeRequestAction;
use rstest_bdd_macros::when;

#[when("the source-git merge request is opened")]
fn merge_request_opened(world: &mut SyncWorld) -> Result<(), eyre::Report> {
    world.dispatch_pending(MergeRequestAction::Opened)
}

#[when("the source-git merge request is closed")]
fn merge_request_closed(world: &mut SyncWorld) -> Result<(), eyre::Report> {
    world.dispatch_pending(MergeRequestAction::Closed)
}

#[when(r#"the dist-git pipeline of merge request #{number:u64} reports "{status}""#)]
fn pipeline_reports(world: &mut SyncWorld, number: u64, status: String) {
    let event = HardlyEvent::Pipeline(PipelineEvent {
        detailed_status: status.clone(),
        status,
        project_url: DIST_GIT_URL.to_owned(),
        pipeline_id: 42,
        source: "merge_request_event".to_owned(),
        merge_request_url: Some(format!("{DIST_GIT_URL}/-/merge_requests/{number}")),
    });
    world.last_results = Some(run_async(world.dispatcher.dispatch(&event)));
}
