//! Hardly: source-git to dist-git merge-request correlation.
//!
//! A merge request on a source-git repository gets a matching merge request
//! on the dist-git repository, kept in step as the source request changes,
//! and the dist-git CI results are relayed back to the source request.
//!
//! # Architecture
//!
//! Hardly follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`correlation`]: Source ↔ downstream request links and their store
//! - [`sync`]: Creating and updating dist-git requests
//! - [`status`]: Relaying dist-git CI results to source requests
//! - [`forge`]: Hosting-system port
//! - [`jobs`]: Task outcomes, retry classification and dispatch
//! - [`config`]: Layered service configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod correlation;
pub mod forge;
pub mod jobs;
pub mod status;
pub mod sync;
pub mod telemetry;
