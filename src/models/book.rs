use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::book::{Book as DomainBook, NewBook as DomainNewBook};
use crate::domain::types::{AuthorName, BookPrice, BookTitle, BookType, TypeConstraintError};

/// Diesel model representing the `books` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::books)]
pub struct Book {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub price: f64,
    pub book_type: String,
    pub cover_url: Option<String>,
    pub file_url: Option<String>,
    pub sample_url: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Book`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::books)]
pub struct NewBook {
    pub user_id: i32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub price: f64,
    pub book_type: String,
    pub cover_url: Option<String>,
    pub file_url: Option<String>,
    pub sample_url: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset applying explicit field updates to a book row. `None` fields
/// are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::books)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub updated_at: NaiveDateTime,
}

/// Diesel model representing the `book_categories` join table.
#[derive(Debug, Insertable, Queryable)]
#[diesel(table_name = crate::schema::book_categories)]
pub struct BookCategory {
    pub book_id: i32,
    pub category_id: i32,
}

impl TryFrom<Book> for DomainBook {
    type Error = TypeConstraintError;

    /// Converts a row into a domain book with an empty category set; the
    /// repository resolves categories in a follow-up query.
    fn try_from(book: Book) -> Result<Self, Self::Error> {
        Ok(Self {
            id: book.id.try_into()?,
            user_id: book.user_id.try_into()?,
            title: BookTitle::new(book.title)?,
            author: AuthorName::new(book.author)?,
            description: book.description,
            price: BookPrice::new(book.price)?,
            book_type: BookType::try_from(book.book_type)?,
            cover_url: book.cover_url,
            file_url: book.file_url,
            sample_url: book.sample_url,
            audio_url: book.audio_url,
            created_at: book.created_at,
            updated_at: book.updated_at,
            categories: Vec::new(),
        })
    }
}

impl From<DomainNewBook> for NewBook {
    fn from(book: DomainNewBook) -> Self {
        Self {
            user_id: book.user_id.get(),
            title: book.title.into_inner(),
            author: book.author.into_inner(),
            description: book.description,
            price: book.price.get(),
            book_type: book.book_type.as_str().to_string(),
            cover_url: book.cover_url,
            file_url: book.file_url,
            sample_url: book.sample_url,
            audio_url: book.audio_url,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}
