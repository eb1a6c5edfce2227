//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Validation
/// and query errors are raised before any state mutation; authentication and
/// authorization errors short-circuit before domain logic runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (malformed input, out-of-range rating,
    /// duplicate review pair).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A geo/text query was malformed (missing or unparseable parameters).
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The caller presented no credential, or a credential that is missing,
    /// forged, expired, or revoked.
    #[error("not authenticated")]
    Unauthenticated,

    /// The caller is authenticated but is neither the owner of the resource
    /// nor an administrator.
    #[error("not authorized")]
    Unauthorized,

    /// A referenced user, store, or review is absent.
    #[error("not found")]
    NotFound,

    /// State could not be reconciled (e.g. a corrupt stored record).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
