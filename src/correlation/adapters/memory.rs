//! In-memory correlation store for tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::correlation::{
    domain::{CorrelationLink, LinkOutcome, RequestIdentity, SourceRecord, SourceRecordId},
    ports::{CorrelationStore, CorrelationStoreError, CorrelationStoreResult},
};

/// Thread-safe in-memory correlation store.
///
/// A single write lock guards every get-or-create, which gives the
/// at-most-one-insert guarantee the port requires.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorrelationStore {
    state: Arc<RwLock<InMemoryCorrelationState>>,
}

#[derive(Debug, Default)]
struct InMemoryCorrelationState {
    sources: HashMap<String, SourceRecord>,
    links: HashMap<SourceRecordId, CorrelationLink>,
    downstream_index: HashMap<String, SourceRecordId>,
}

impl InMemoryCorrelationStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of persisted links.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the lock is poisoned.
    pub fn link_count(&self) -> CorrelationStoreResult<usize> {
        let state = self.state.read().map_err(|err| {
            CorrelationStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.links.len())
    }
}

#[async_trait]
impl CorrelationStore for InMemoryCorrelationStore {
    async fn get_or_create_source_record(
        &self,
        identity: &RequestIdentity,
        first_seen_at: DateTime<Utc>,
    ) -> CorrelationStoreResult<SourceRecord> {
        let mut state = self.state.write().map_err(|err| {
            CorrelationStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let record = state
            .sources
            .entry(identity.to_canonical())
            .or_insert_with(|| SourceRecord::new(identity.clone(), first_seen_at))
            .clone();
        Ok(record)
    }

    async fn get_or_create_link(
        &self,
        source: &SourceRecord,
        downstream: &RequestIdentity,
        linked_at: DateTime<Utc>,
    ) -> CorrelationStoreResult<LinkOutcome> {
        let mut state = self.state.write().map_err(|err| {
            CorrelationStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if let Some(existing) = state.links.get(&source.id()) {
            return Ok(LinkOutcome::Existing(existing.clone()));
        }

        let downstream_key = downstream.to_canonical();
        if let Some(owner) = state
            .downstream_index
            .get(&downstream_key)
            .and_then(|owner_id| state.links.get(owner_id))
        {
            return Err(CorrelationStoreError::DownstreamClaimed {
                downstream: downstream.clone(),
                owner: owner.source().clone(),
            });
        }

        state
            .sources
            .entry(source.identity().to_canonical())
            .or_insert_with(|| source.clone());
        let link = CorrelationLink::new(source.identity().clone(), downstream.clone(), linked_at);
        state.downstream_index.insert(downstream_key, source.id());
        state.links.insert(source.id(), link.clone());
        Ok(LinkOutcome::Created(link))
    }

    async fn lookup_downstream_by_source(
        &self,
        source: &SourceRecord,
    ) -> CorrelationStoreResult<Option<RequestIdentity>> {
        let state = self.state.read().map_err(|err| {
            CorrelationStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .links
            .get(&source.id())
            .map(|link| link.downstream().clone()))
    }

    async fn lookup_source_by_downstream(
        &self,
        downstream: &RequestIdentity,
    ) -> CorrelationStoreResult<Option<RequestIdentity>> {
        let state = self.state.read().map_err(|err| {
            CorrelationStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let source = state
            .downstream_index
            .get(&downstream.to_canonical())
            .and_then(|source_id| state.links.get(source_id))
            .map(|link| link.source().clone());
        Ok(source)
    }
}
