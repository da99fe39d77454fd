//! Port contracts for request correlation.
//!
//! Ports define infrastructure-agnostic interfaces used by the sync and
//! status services.

pub mod store;

pub use store::{CorrelationStore, CorrelationStoreError, CorrelationStoreResult};
