use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AuthorName, BookId, BookPrice, BookTitle, BookType, CategoryName, UserId};

/// A purchasable book in the catalog.
///
/// Asset locations are opaque strings supplied by the upload collaborator;
/// this layer never parses or verifies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub user_id: UserId,
    pub title: BookTitle,
    pub author: AuthorName,
    pub description: Option<String>,
    pub price: BookPrice,
    pub book_type: BookType,
    pub cover_url: Option<String>,
    pub file_url: Option<String>,
    pub sample_url: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Resolved category names, populated by the repository.
    pub categories: Vec<CategoryName>,
}

/// Data required to insert a new [`Book`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBook {
    pub user_id: UserId,
    pub title: BookTitle,
    pub author: AuthorName,
    pub description: Option<String>,
    pub price: BookPrice,
    pub book_type: BookType,
    pub cover_url: Option<String>,
    pub file_url: Option<String>,
    pub sample_url: Option<String>,
    pub audio_url: Option<String>,
    /// De-duplicated category names to reconcile against the category table.
    pub categories: Vec<CategoryName>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Explicit field updates applied to an existing [`Book`].
///
/// Categories are fixed at creation time and intentionally absent here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateBook {
    pub title: Option<BookTitle>,
    pub author: Option<AuthorName>,
    pub description: Option<String>,
    pub price: Option<BookPrice>,
}
