//! Hosting-system access (comments, closing requests, project lookup).
//!
//! Concrete API clients live outside this crate; [`adapters`] only ships the
//! in-memory implementation used by tests and local runs.

pub mod adapters;
pub mod domain;
pub mod ports;
