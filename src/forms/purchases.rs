use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::purchase::NewPurchase;
use crate::domain::types::{
    BookId, PaymentIntentRef, PaymentMethod, TypeConstraintError, UserId,
};

/// Raw checkout fields as submitted by the API client. The payment intent
/// reference originates from the payment collaborator and is treated as an
/// opaque foreign identifier.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePurchaseForm {
    #[validate(range(min = 1))]
    pub book_id: i32,
    #[validate(length(min = 1))]
    pub payment_method: String,
    #[validate(length(min = 1))]
    pub payment_intent: String,
}

/// Validated, typed form of [`CreatePurchaseForm`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePurchaseFormPayload {
    pub book_id: BookId,
    pub payment_method: PaymentMethod,
    pub payment_intent: PaymentIntentRef,
}

impl CreatePurchaseFormPayload {
    pub fn into_new_purchase(self, user_id: UserId) -> NewPurchase {
        NewPurchase {
            user_id,
            book_id: self.book_id,
            payment_method: self.payment_method,
            payment_intent: self.payment_intent,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreatePurchaseFormError {
    #[error("Create purchase form validation failed: {0}")]
    Validation(String),
    #[error("Create purchase form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreatePurchaseFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreatePurchaseFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreatePurchaseForm> for CreatePurchaseFormPayload {
    type Error = CreatePurchaseFormError;

    fn try_from(value: CreatePurchaseForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            book_id: BookId::new(value.book_id)?,
            payment_method: PaymentMethod::new(value.payment_method)?,
            payment_intent: PaymentIntentRef::new(value.payment_intent)?,
        })
    }
}
