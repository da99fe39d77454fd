//! Domain model for source ↔ downstream request correlation.
//!
//! Identities are immutable once observed. A source request maps to at most
//! one downstream request and the mapping is never removed, so it survives
//! close and reopen of either side.

mod error;
mod ids;
mod link;
mod request;

pub use error::CorrelationDomainError;
pub use ids::{ProjectUrl, RequestNumber, SourceRecordId};
pub use link::{CorrelationLink, LinkOutcome, SourceRecord};
pub use request::{ProjectRef, RequestIdentity};
