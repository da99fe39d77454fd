//! Identifier and validated scalar types for request correlation.

use super::CorrelationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Namespace for name-based record identifiers.
const RECORD_NAMESPACE: Uuid = Uuid::from_u128(0x6861_7264_6c79_4000_8000_7372_6367_6974);

/// Identifier of a persisted request record.
///
/// Derived from the canonical request key, so every worker computes the
/// same identifier for the same request before touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRecordId(Uuid);

impl SourceRecordId {
    /// Returns the identifier for a canonical request key.
    #[must_use]
    pub fn for_request_key(canonical_key: &str) -> Self {
        Self(Uuid::new_v5(&RECORD_NAMESPACE, canonical_key.as_bytes()))
    }

    /// Wraps an identifier read back from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

/// Positive merge/pull request number assigned by a hosting system.
///
/// Bounded by `i64::MAX` because request numbers are stored as `BIGINT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct RequestNumber(u64);

impl RequestNumber {
    const MAX: u64 = i64::MAX.unsigned_abs();

    /// Creates a validated request number.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationDomainError::InvalidRequestNumber`] when the value
    /// is zero or does not fit a `BIGINT` column.
    pub fn new(value: u64) -> Result<Self, CorrelationDomainError> {
        if value == 0 || value > Self::MAX {
            return Err(CorrelationDomainError::InvalidRequestNumber(i128::from(value)));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the value as stored in a `BIGINT` column.
    #[must_use]
    pub fn as_column_value(self) -> i64 {
        // `new` rejects values above `i64::MAX`.
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

impl TryFrom<u64> for RequestNumber {
    type Error = CorrelationDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for RequestNumber {
    type Error = CorrelationDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map_err(|_| CorrelationDomainError::InvalidRequestNumber(i128::from(value)))
            .and_then(Self::new)
    }
}

impl From<RequestNumber> for u64 {
    fn from(number: RequestNumber) -> Self {
        number.0
    }
}

impl fmt::Display for RequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Web URL of a hosted project, without a trailing slash.
///
/// # Examples
///
///     use hardly::correlation::domain::ProjectUrl;
///
///     let url = ProjectUrl::new("https://gitlab.com/redhat/centos-stream/rpms/make/")
///         .expect("valid URL");
///     assert_eq!(url.as_str(), "https://gitlab.com/redhat/centos-stream/rpms/make");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectUrl(String);

impl ProjectUrl {
    /// Creates a validated project URL.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationDomainError::InvalidProjectUrl`] when the value is
    /// empty after trimming or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, CorrelationDomainError> {
        let raw = value.into();
        let normalized = raw.trim().trim_end_matches('/');
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(CorrelationDomainError::InvalidProjectUrl(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
