use thiserror::Error;

pub mod books;
pub mod payments;
pub mod progress;
pub mod purchases;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The user is not authorized to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// The user already owns the book.
    #[error("already owned")]
    AlreadyOwned,
    /// A submitted form failed validation.
    #[error("invalid form: {0}")]
    Form(String),
    /// A value failed a domain type constraint.
    #[error("invalid value: {0}")]
    TypeConstraint(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
