use serde::Serialize;

use crate::domain::book::Book;

/// Response shape for a catalog book.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookDto {
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
    pub categories: Vec<String>,
    pub created_at: chrono::NaiveDateTime,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        Self {
            id: value.id.get(),
            user_id: value.user_id.get(),
            title: value.title.into_inner(),
            author: value.author.into_inner(),
            description: value.description,
            price: value.price.get(),
            book_type: value.book_type.as_str().to_string(),
            cover_url: value.cover_url,
            file_url: value.file_url,
            sample_url: value.sample_url,
            audio_url: value.audio_url,
            categories: value
                .categories
                .into_iter()
                .map(|c| c.into_inner())
                .collect(),
            created_at: value.created_at,
        }
    }
}

/// Paged catalog listing.
#[derive(Debug, Clone, Serialize)]
pub struct BookPageDto {
    pub total: usize,
    pub books: Vec<BookDto>,
}
