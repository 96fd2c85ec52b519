use serde::{Deserialize, Serialize};

use crate::domain::types::{BookId, PaymentIntentRef};

/// A fabricated payment intent for the mock provider.
///
/// The reference is an opaque foreign identifier; nothing in this crate
/// validates it or calls out to a payment network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub book_id: BookId,
    pub reference: PaymentIntentRef,
    /// Amount in minor currency units (cents), derived from the book price.
    pub amount_minor: i64,
}
