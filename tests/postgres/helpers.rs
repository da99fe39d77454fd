//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use hardly::correlation::{adapters::PostgresCorrelationStore, domain::RequestIdentity};
use tokio::runtime::Runtime;

/// SQL creating the request and link tables.
pub const CREATE_LINK_TABLES_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_request_links/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "hardly_test_template";

/// Builds the current-thread runtime used to drive async store calls.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: PostgresCluster) -> Result<(), BoxError> {
    cluster.ensure_template_exists(TEMPLATE_DB, |db_name| {
        let mut conn = PgConnection::establish(&cluster.database_url(db_name))
            .map_err(|err| Box::new(err) as BoxError)?;
        conn.batch_execute(CREATE_LINK_TABLES_SQL)
            .map_err(|err| Box::new(err) as BoxError)
    })
}

/// Creates `db_name` from the template and returns a store bound to it.
///
/// # Errors
///
/// Returns an error if database creation or pool setup fails.
pub fn setup_store(
    cluster: PostgresCluster,
    db_name: &str,
) -> Result<PostgresCorrelationStore, BoxError> {
    cluster.create_database_from_template(db_name, TEMPLATE_DB)?;
    let manager = ConnectionManager::<PgConnection>::new(cluster.database_url(db_name));
    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(PostgresCorrelationStore::new(pool))
}

/// Drops a per-test database when the test finishes.
pub struct CleanupGuard {
    cluster: PostgresCluster,
    db_name: String,
    armed: bool,
}

impl CleanupGuard {
    #[must_use]
    pub const fn new(cluster: PostgresCluster, db_name: String) -> Self {
        Self {
            cluster,
            db_name,
            armed: true,
        }
    }

    /// Drops the database now, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be dropped.
    pub fn cleanup(mut self) -> Result<(), BoxError> {
        self.armed = false;
        self.cluster.drop_database(&self.db_name)
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if self.armed {
            drop(self.cluster.drop_database(&self.db_name));
        }
    }
}

/// Returns a unique database name for one test.
#[must_use]
pub fn database_name(prefix: &str) -> String {
    format!("test_{prefix}_{}", uuid::Uuid::new_v4().simple())
}

/// Source-git request `#number` of `open-vm-tools`.
///
/// # Errors
///
/// Returns an error if the identity is invalid.
pub fn source_request(number: u64) -> Result<RequestIdentity, BoxError> {
    RequestIdentity::from_parts(
        "packit-service/src",
        "open-vm-tools",
        "https://gitlab.com/packit-service/src/open-vm-tools",
        number,
    )
    .map_err(|err| Box::new(err) as BoxError)
}

/// Dist-git request `#number` of `open-vm-tools`.
///
/// # Errors
///
/// Returns an error if the identity is invalid.
pub fn dist_git_request(number: u64) -> Result<RequestIdentity, BoxError> {
    RequestIdentity::from_parts(
        "redhat/centos-stream/rpms",
        "open-vm-tools",
        "https://gitlab.com/redhat/centos-stream/rpms/open-vm-tools",
        number,
    )
    .map_err(|err| Box::new(err) as BoxError)
}
