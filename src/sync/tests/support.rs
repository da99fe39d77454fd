//! Shared builders for sync service tests.

use crate::correlation::domain::{ProjectRef, RequestIdentity};
use crate::sync::domain::{MergeRequestAction, MergeRequestEvent, PackageConfig};

pub const SOURCE_URL: &str = "https://gitlab.com/packit-service/src/open-vm-tools";
pub const DIST_GIT_URL: &str = "https://gitlab.com/redhat/centos-stream/rpms/open-vm-tools";
pub const MR_URL: &str = "https://gitlab.com/packit-service/src/open-vm-tools/-/merge_requests/5";

pub fn source_project() -> ProjectRef {
    ProjectRef::new("packit-service/src", "open-vm-tools", SOURCE_URL).expect("valid project")
}

pub fn dist_git_project() -> ProjectRef {
    ProjectRef::new("redhat/centos-stream/rpms", "open-vm-tools", DIST_GIT_URL)
        .expect("valid project")
}

pub fn source_request() -> RequestIdentity {
    RequestIdentity::from_parts("packit-service/src", "open-vm-tools", SOURCE_URL, 5)
        .expect("valid identity")
}

pub fn dist_git_request(number: u64) -> RequestIdentity {
    RequestIdentity::from_parts("redhat/centos-stream/rpms", "open-vm-tools", DIST_GIT_URL, number)
        .expect("valid identity")
}

pub fn package() -> PackageConfig {
    PackageConfig::new("open-vm-tools")
        .with_upstream_project_url("https://github.com/vmware/open-vm-tools.git")
        .with_specfile_path(".distro/open-vm-tools.spec")
}

pub fn mr_event(action: MergeRequestAction) -> MergeRequestEvent {
    MergeRequestEvent {
        action,
        identifier: 5,
        title: "Yet another testing MR".to_owned(),
        description: "DnD RpcV3: fix OOB access\n\nBugzilla: 12345".to_owned(),
        url: MR_URL.to_owned(),
        project_url: SOURCE_URL.to_owned(),
        source_project_url: "https://gitlab.com/jpopelka/src-open-vm-tools".to_owned(),
        target_repo_namespace: "packit-service/src".to_owned(),
        target_repo_name: "open-vm-tools".to_owned(),
        target_repo_branch: "c9s".to_owned(),
        oldrev: None,
        commit_sha: Some("94ccba9f986629e24b432c11d9c7fd20bb2ea51d".to_owned()),
    }
}
