//! Diesel row models for correlation persistence.

use super::schema::{pull_requests, request_links};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for request records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pull_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PullRequestRow {
    /// Internal record identifier.
    pub id: uuid::Uuid,
    /// Project namespace.
    pub namespace: String,
    /// Repository name.
    pub repo_name: String,
    /// Project web URL.
    pub project_url: String,
    /// Request number.
    pub pr_number: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for request records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pull_requests)]
pub struct NewPullRequestRow {
    /// Internal record identifier.
    pub id: uuid::Uuid,
    /// Project namespace.
    pub namespace: String,
    /// Repository name.
    pub repo_name: String,
    /// Project web URL.
    pub project_url: String,
    /// Request number.
    pub pr_number: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for links.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = request_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RequestLinkRow {
    /// Source request record.
    pub source_id: uuid::Uuid,
    /// Downstream request record.
    pub downstream_id: uuid::Uuid,
    /// Link timestamp.
    pub linked_at: DateTime<Utc>,
}

/// Insert model for links.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = request_links)]
pub struct NewRequestLinkRow {
    /// Source request record.
    pub source_id: uuid::Uuid,
    /// Downstream request record.
    pub downstream_id: uuid::Uuid,
    /// Link timestamp.
    pub linked_at: DateTime<Utc>,
}
