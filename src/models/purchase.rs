use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::purchase::{Purchase as DomainPurchase, PurchaseWithBook};
use crate::domain::types::{
    AuthorName, BookPrice, BookTitle, BookType, PaymentIntentRef, PaymentMethod,
    TypeConstraintError,
};

/// Diesel model representing the `purchases` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::purchases)]
pub struct Purchase {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub price: f64,
    pub payment_method: String,
    pub payment_intent: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Purchase`]. The price has already been snapshotted
/// from the book row by the repository.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::purchases)]
pub struct NewPurchase {
    pub user_id: i32,
    pub book_id: i32,
    pub price: f64,
    pub payment_method: String,
    pub payment_intent: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Purchase> for DomainPurchase {
    type Error = TypeConstraintError;

    fn try_from(purchase: Purchase) -> Result<Self, Self::Error> {
        Ok(Self {
            id: purchase.id.try_into()?,
            user_id: purchase.user_id.try_into()?,
            book_id: purchase.book_id.try_into()?,
            price: BookPrice::new(purchase.price)?,
            payment_method: PaymentMethod::new(purchase.payment_method)?,
            payment_intent: PaymentIntentRef::new(purchase.payment_intent)?,
            created_at: purchase.created_at,
        })
    }
}

impl TryFrom<(Purchase, String, String, Option<String>, String)> for PurchaseWithBook {
    type Error = TypeConstraintError;

    fn try_from(
        (purchase, title, author, cover_url, book_type): (
            Purchase,
            String,
            String,
            Option<String>,
            String,
        ),
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            purchase: purchase.try_into()?,
            title: BookTitle::new(title)?,
            author: AuthorName::new(author)?,
            cover_url,
            book_type: BookType::try_from(book_type)?,
        })
    }
}
