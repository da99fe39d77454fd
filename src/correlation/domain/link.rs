//! Source record and correlation link types.

use super::{RequestIdentity, SourceRecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted record of a source request.
///
/// Obtained through get-or-create; the identifier is derived from the
/// request identity and is the handle used to look up the linked downstream
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    id: SourceRecordId,
    identity: RequestIdentity,
    first_seen_at: DateTime<Utc>,
}

impl SourceRecord {
    /// Creates a record for a source request observed at `first_seen_at`.
    #[must_use]
    pub fn new(identity: RequestIdentity, first_seen_at: DateTime<Utc>) -> Self {
        Self {
            id: SourceRecordId::for_request_key(&identity.to_canonical()),
            identity,
            first_seen_at,
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: SourceRecordId,
        identity: RequestIdentity,
        first_seen_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            identity,
            first_seen_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> SourceRecordId {
        self.id
    }

    /// Returns the source request identity.
    #[must_use]
    pub const fn identity(&self) -> &RequestIdentity {
        &self.identity
    }

    /// Returns when the request was first recorded.
    #[must_use]
    pub const fn first_seen_at(&self) -> DateTime<Utc> {
        self.first_seen_at
    }
}

/// Association of one source request with its downstream counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationLink {
    source: RequestIdentity,
    downstream: RequestIdentity,
    linked_at: DateTime<Utc>,
}

impl CorrelationLink {
    /// Creates a link between a source and a downstream request.
    #[must_use]
    pub const fn new(
        source: RequestIdentity,
        downstream: RequestIdentity,
        linked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source,
            downstream,
            linked_at,
        }
    }

    /// Returns the source request.
    #[must_use]
    pub const fn source(&self) -> &RequestIdentity {
        &self.source
    }

    /// Returns the downstream request.
    #[must_use]
    pub const fn downstream(&self) -> &RequestIdentity {
        &self.downstream
    }

    /// Returns when the link was first persisted.
    #[must_use]
    pub const fn linked_at(&self) -> DateTime<Utc> {
        self.linked_at
    }
}

/// Result of a get-or-create link call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// This call inserted the link.
    Created(CorrelationLink),
    /// A link for the source already existed and was left untouched.
    Existing(CorrelationLink),
}

impl LinkOutcome {
    /// Returns the persisted link.
    #[must_use]
    pub const fn link(&self) -> &CorrelationLink {
        match self {
            Self::Created(link) | Self::Existing(link) => link,
        }
    }

    /// Returns `true` when this call created the link.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
