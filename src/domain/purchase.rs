use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AuthorName, BookId, BookPrice, BookTitle, BookType, PaymentIntentRef, PaymentMethod,
    PurchaseId, UserId,
};

/// An immutable ledger entry recording that a user bought a book.
///
/// `price` is the amount captured at purchase time; later edits to the book
/// do not touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub price: BookPrice,
    pub payment_method: PaymentMethod,
    pub payment_intent: PaymentIntentRef,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Purchase`].
///
/// The price is deliberately absent: the repository snapshots the book's
/// current price inside the same transaction as the insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPurchase {
    pub user_id: UserId,
    pub book_id: BookId,
    pub payment_method: PaymentMethod,
    pub payment_intent: PaymentIntentRef,
}

/// A purchase joined with the metadata of the purchased book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseWithBook {
    pub purchase: Purchase,
    pub title: BookTitle,
    pub author: AuthorName,
    pub cover_url: Option<String>,
    pub book_type: BookType,
}

/// Sales aggregate for a single book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookSales {
    pub count: usize,
    pub revenue: f64,
}

impl BookSales {
    pub const ZERO: Self = Self {
        count: 0,
        revenue: 0.0,
    };
}

/// Per-book sales entry in an author's report. Books with zero sales
/// are included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorBookSales {
    pub book_id: BookId,
    pub title: BookTitle,
    pub sales: BookSales,
}
