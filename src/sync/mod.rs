//! Source-git to dist-git merge-request synchronization.
//!
//! A merge request opened against a handled source-git target gets a
//! matching dist-git merge request created through content sync; later
//! updates, closures and reopenings are mirrored onto it as comments. The
//! link between the two requests lives in the correlation store.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
