use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::progress::{ProgressWithBook, ReadingProgress as DomainProgress};
use crate::domain::types::{
    AuthorName, BookTitle, BookType, CompletionPercent, ReadingPosition, TypeConstraintError,
};

/// Diesel model representing the `reading_progress` table.
///
/// The table is keyed by `(user_id, book_id)`; there is no surrogate id.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reading_progress)]
pub struct ReadingProgress {
    pub user_id: i32,
    pub book_id: i32,
    pub last_position: f64,
    pub completion_percent: f64,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`ReadingProgress`], also used as the changeset on
/// conflict.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::reading_progress)]
pub struct NewReadingProgress {
    pub user_id: i32,
    pub book_id: i32,
    pub last_position: f64,
    pub completion_percent: f64,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ReadingProgress> for DomainProgress {
    type Error = TypeConstraintError;

    fn try_from(progress: ReadingProgress) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: progress.user_id.try_into()?,
            book_id: progress.book_id.try_into()?,
            last_position: ReadingPosition::new(progress.last_position)?,
            completion_percent: CompletionPercent::new(progress.completion_percent)?,
            updated_at: progress.updated_at,
        })
    }
}

impl TryFrom<(ReadingProgress, String, String, Option<String>, String)> for ProgressWithBook {
    type Error = TypeConstraintError;

    fn try_from(
        (progress, title, author, cover_url, book_type): (
            ReadingProgress,
            String,
            String,
            Option<String>,
            String,
        ),
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            progress: progress.try_into()?,
            title: BookTitle::new(title)?,
            author: AuthorName::new(author)?,
            cover_url,
            book_type: BookType::try_from(book_type)?,
        })
    }
}
