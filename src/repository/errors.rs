//! Error type shared by all repository implementations.

use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Failures surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A referenced entity does not exist.
    #[error("not found")]
    NotFound,
    /// The user already owns the book; duplicate purchases are rejected.
    #[error("already owned")]
    AlreadyOwned,
    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
    /// A row failed domain validation while being loaded.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// Any other Diesel failure.
    #[error("database error: {0}")]
    DatabaseError(diesel::result::Error),
    /// The connection pool could not hand out a connection.
    #[error("connection pool error: {0}")]
    PoolError(#[from] diesel::r2d2::PoolError),
}

impl From<diesel::result::Error> for RepositoryError {
    /// Lifts uniqueness violations into [`RepositoryError::Conflict`] so the
    /// `?` operator classifies them; callers decide whether a conflict means
    /// "retry" (category reconciliation) or "reject" (duplicate purchase).
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_string())
            }
            other => Self::DatabaseError(other),
        }
    }
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
