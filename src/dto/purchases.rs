use serde::Serialize;

use crate::domain::payment::PaymentIntent;
use crate::domain::purchase::{AuthorBookSales, BookSales, Purchase, PurchaseWithBook};

/// Response shape for a ledger entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PurchaseDto {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub price: f64,
    pub payment_method: String,
    pub payment_intent: String,
    pub created_at: chrono::NaiveDateTime,
}

impl From<Purchase> for PurchaseDto {
    fn from(value: Purchase) -> Self {
        Self {
            id: value.id.get(),
            user_id: value.user_id.get(),
            book_id: value.book_id.get(),
            price: value.price.get(),
            payment_method: value.payment_method.into_inner(),
            payment_intent: value.payment_intent.into_inner(),
            created_at: value.created_at,
        }
    }
}

/// A purchase with the metadata of the purchased book, for library views.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseWithBookDto {
    #[serde(flatten)]
    pub purchase: PurchaseDto,
    pub title: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub book_type: String,
}

impl From<PurchaseWithBook> for PurchaseWithBookDto {
    fn from(value: PurchaseWithBook) -> Self {
        Self {
            purchase: value.purchase.into(),
            title: value.title.into_inner(),
            author: value.author.into_inner(),
            cover_url: value.cover_url,
            book_type: value.book_type.as_str().to_string(),
        }
    }
}

/// Sales aggregate for a single book.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookSalesDto {
    pub count: usize,
    pub revenue: f64,
}

impl From<BookSales> for BookSalesDto {
    fn from(value: BookSales) -> Self {
        Self {
            count: value.count,
            revenue: value.revenue,
        }
    }
}

/// Per-book entry in an author's sales report.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorBookSalesDto {
    pub book_id: i32,
    pub title: String,
    pub count: usize,
    pub revenue: f64,
}

impl From<AuthorBookSales> for AuthorBookSalesDto {
    fn from(value: AuthorBookSales) -> Self {
        Self {
            book_id: value.book_id.get(),
            title: value.title.into_inner(),
            count: value.sales.count,
            revenue: value.sales.revenue,
        }
    }
}

/// Response shape for a fabricated payment intent.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentIntentDto {
    pub book_id: i32,
    pub reference: String,
    pub amount_minor: i64,
}

impl From<PaymentIntent> for PaymentIntentDto {
    fn from(value: PaymentIntent) -> Self {
        Self {
            book_id: value.book_id.get(),
            reference: value.reference.into_inner(),
            amount_minor: value.amount_minor,
        }
    }
}
