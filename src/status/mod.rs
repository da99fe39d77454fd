//! Relaying of dist-git CI results to source-git merge requests.
//!
//! GitLab pipeline and Pagure flag updates on a dist-git request are
//! normalized into a commit status and published on the head commit of the
//! linked source-git request. Requests without a link are ignored.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
