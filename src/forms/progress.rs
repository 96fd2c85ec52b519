use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::progress::ProgressUpdate;
use crate::domain::types::{
    BookId, CompletionPercent, ReadingPosition, TypeConstraintError, UserId,
};

/// Raw progress report as submitted by the reader UI.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProgressForm {
    #[validate(range(min = 1))]
    pub book_id: i32,
    #[validate(range(min = 0.0))]
    pub last_position: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub completion_percent: f64,
}

/// Validated, typed form of [`UpdateProgressForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProgressFormPayload {
    pub book_id: BookId,
    pub last_position: ReadingPosition,
    pub completion_percent: CompletionPercent,
}

impl UpdateProgressFormPayload {
    pub fn into_progress_update(self, user_id: UserId) -> ProgressUpdate {
        ProgressUpdate {
            user_id,
            book_id: self.book_id,
            last_position: self.last_position,
            completion_percent: self.completion_percent,
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateProgressFormError {
    #[error("Update progress form validation failed: {0}")]
    Validation(String),
    #[error("Update progress form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateProgressFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateProgressFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateProgressForm> for UpdateProgressFormPayload {
    type Error = UpdateProgressFormError;

    fn try_from(value: UpdateProgressForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            book_id: BookId::new(value.book_id)?,
            last_position: ReadingPosition::new(value.last_position)?,
            completion_percent: CompletionPercent::new(value.completion_percent)?,
        })
    }
}
