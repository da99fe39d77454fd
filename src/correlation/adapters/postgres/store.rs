//! `PostgreSQL` correlation store.

use super::{
    models::{NewPullRequestRow, NewRequestLinkRow, PullRequestRow, RequestLinkRow},
    schema::{pull_requests, request_links},
};
use crate::correlation::{
    domain::{
        CorrelationLink, LinkOutcome, RequestIdentity, RequestNumber, SourceRecord, SourceRecordId,
    },
    ports::{CorrelationStore, CorrelationStoreError, CorrelationStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by the correlation store.
pub type CorrelationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed correlation store.
///
/// Uniqueness is enforced by the schema (`uq_pull_requests_project_number`,
/// the `request_links` primary key and `uq_request_links_downstream`); every
/// insert is `ON CONFLICT DO NOTHING` followed by a read, so racing workers
/// converge on the row that won.
#[derive(Debug, Clone)]
pub struct PostgresCorrelationStore {
    pool: CorrelationPgPool,
}

impl PostgresCorrelationStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CorrelationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CorrelationStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CorrelationStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CorrelationStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CorrelationStoreError::persistence)?
    }
}

impl From<DieselError> for CorrelationStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl CorrelationStore for PostgresCorrelationStore {
    async fn get_or_create_source_record(
        &self,
        identity: &RequestIdentity,
        first_seen_at: DateTime<Utc>,
    ) -> CorrelationStoreResult<SourceRecord> {
        let lookup = identity.clone();
        self.run_blocking(move |connection| {
            let row = get_or_create_request_row(connection, &lookup, first_seen_at)?;
            Ok(SourceRecord::from_persisted(
                SourceRecordId::from_uuid(row.id),
                lookup,
                row.created_at,
            ))
        })
        .await
    }

    async fn get_or_create_link(
        &self,
        source: &SourceRecord,
        downstream: &RequestIdentity,
        linked_at: DateTime<Utc>,
    ) -> CorrelationStoreResult<LinkOutcome> {
        let source_identity = source.identity().clone();
        let downstream_identity = downstream.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, CorrelationStoreError, _>(|conn| {
                let source_row = get_or_create_request_row(conn, &source_identity, linked_at)?;
                let downstream_row =
                    get_or_create_request_row(conn, &downstream_identity, linked_at)?;

                let inserted = diesel::insert_into(request_links::table)
                    .values(&NewRequestLinkRow {
                        source_id: source_row.id,
                        downstream_id: downstream_row.id,
                        linked_at,
                    })
                    .on_conflict_do_nothing()
                    .execute(conn)?;
                if inserted == 1 {
                    return Ok(LinkOutcome::Created(CorrelationLink::new(
                        source_identity.clone(),
                        downstream_identity.clone(),
                        linked_at,
                    )));
                }

                if let Some(existing) = find_link_by_source(conn, source_row.id)? {
                    let linked_row = load_request_row(conn, existing.downstream_id)?;
                    return Ok(LinkOutcome::Existing(CorrelationLink::new(
                        row_to_identity(source_row)?,
                        row_to_identity(linked_row)?,
                        existing.linked_at,
                    )));
                }

                let claim = find_link_by_downstream(conn, downstream_row.id)?.ok_or_else(|| {
                    CorrelationStoreError::persistence(std::io::Error::other(
                        "link insert conflicted without a visible owner",
                    ))
                })?;
                let owner_row = load_request_row(conn, claim.source_id)?;
                Err(CorrelationStoreError::DownstreamClaimed {
                    downstream: downstream_identity.clone(),
                    owner: row_to_identity(owner_row)?,
                })
            })
        })
        .await
    }

    async fn lookup_downstream_by_source(
        &self,
        source: &SourceRecord,
    ) -> CorrelationStoreResult<Option<RequestIdentity>> {
        let source_id = source.id().into_inner();
        self.run_blocking(move |connection| {
            let Some(link) = find_link_by_source(connection, source_id)? else {
                return Ok(None);
            };
            let row = load_request_row(connection, link.downstream_id)?;
            row_to_identity(row).map(Some)
        })
        .await
    }

    async fn lookup_source_by_downstream(
        &self,
        downstream: &RequestIdentity,
    ) -> CorrelationStoreResult<Option<RequestIdentity>> {
        let lookup = downstream.clone();
        self.run_blocking(move |connection| {
            let Some(downstream_row) = find_request_row(connection, &lookup)? else {
                return Ok(None);
            };
            let Some(link) = find_link_by_downstream(connection, downstream_row.id)? else {
                return Ok(None);
            };
            let row = load_request_row(connection, link.source_id)?;
            row_to_identity(row).map(Some)
        })
        .await
    }
}

fn to_new_row(identity: &RequestIdentity, created_at: DateTime<Utc>) -> NewPullRequestRow {
    NewPullRequestRow {
        id: SourceRecordId::for_request_key(&identity.to_canonical()).into_inner(),
        namespace: identity.namespace().to_owned(),
        repo_name: identity.repo_name().to_owned(),
        project_url: identity.project_url().as_str().to_owned(),
        pr_number: identity.request_number().as_column_value(),
        created_at,
    }
}

fn row_to_identity(row: PullRequestRow) -> CorrelationStoreResult<RequestIdentity> {
    let PullRequestRow {
        namespace,
        repo_name,
        project_url,
        pr_number,
        ..
    } = row;
    let number = RequestNumber::try_from(pr_number).map_err(CorrelationStoreError::persistence)?;
    RequestIdentity::from_parts(&namespace, &repo_name, &project_url, number.value())
        .map_err(CorrelationStoreError::persistence)
}

fn get_or_create_request_row(
    connection: &mut PgConnection,
    identity: &RequestIdentity,
    created_at: DateTime<Utc>,
) -> CorrelationStoreResult<PullRequestRow> {
    let new_row = to_new_row(identity, created_at);
    diesel::insert_into(pull_requests::table)
        .values(&new_row)
        .on_conflict_do_nothing()
        .execute(connection)?;

    find_request_row(connection, identity)?.ok_or_else(|| {
        CorrelationStoreError::persistence(std::io::Error::other(format!(
            "request record for {identity} vanished after upsert"
        )))
    })
}

fn find_request_row(
    connection: &mut PgConnection,
    identity: &RequestIdentity,
) -> CorrelationStoreResult<Option<PullRequestRow>> {
    Ok(pull_requests::table
        .filter(pull_requests::project_url.eq(identity.project_url().as_str()))
        .filter(pull_requests::pr_number.eq(identity.request_number().as_column_value()))
        .select(PullRequestRow::as_select())
        .first::<PullRequestRow>(connection)
        .optional()?)
}

fn load_request_row(
    connection: &mut PgConnection,
    id: uuid::Uuid,
) -> CorrelationStoreResult<PullRequestRow> {
    Ok(pull_requests::table
        .filter(pull_requests::id.eq(id))
        .select(PullRequestRow::as_select())
        .first::<PullRequestRow>(connection)?)
}

fn find_link_by_source(
    connection: &mut PgConnection,
    source_id: uuid::Uuid,
) -> CorrelationStoreResult<Option<RequestLinkRow>> {
    Ok(request_links::table
        .filter(request_links::source_id.eq(source_id))
        .select(RequestLinkRow::as_select())
        .first::<RequestLinkRow>(connection)
        .optional()?)
}

fn find_link_by_downstream(
    connection: &mut PgConnection,
    downstream_id: uuid::Uuid,
) -> CorrelationStoreResult<Option<RequestLinkRow>> {
    Ok(request_links::table
        .filter(request_links::downstream_id.eq(downstream_id))
        .select(RequestLinkRow::as_select())
        .first::<RequestLinkRow>(connection)
        .optional()?)
}
