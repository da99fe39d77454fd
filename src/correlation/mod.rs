//! Source ↔ downstream request correlation.
//!
//! Maps a merge request on the source-git repository to the dist-git request
//! created for it, and back. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
