//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository/service error types, so the
//! cross-layer `From` impls live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::books::{CreateBookFormError, UpdateBookFormError};
    use crate::forms::progress::UpdateProgressFormError;
    use crate::forms::purchases::CreatePurchaseFormError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<CreateBookFormError> for ServiceError {
        fn from(val: CreateBookFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<UpdateBookFormError> for ServiceError {
        fn from(val: UpdateBookFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<CreatePurchaseFormError> for ServiceError {
        fn from(val: CreatePurchaseFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<UpdateProgressFormError> for ServiceError {
        fn from(val: UpdateProgressFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }
}
