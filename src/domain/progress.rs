use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AuthorName, BookId, BookTitle, BookType, CompletionPercent, ReadingPosition, UserId,
};

/// Per-(user, book) reading state. At most one row exists per pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub user_id: UserId,
    pub book_id: BookId,
    pub last_position: ReadingPosition,
    pub completion_percent: CompletionPercent,
    pub updated_at: NaiveDateTime,
}

/// An incoming progress report, upserted by the repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressUpdate {
    pub user_id: UserId,
    pub book_id: BookId,
    pub last_position: ReadingPosition,
    pub completion_percent: CompletionPercent,
}

/// A progress row joined with the metadata of the book it tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressWithBook {
    pub progress: ReadingProgress,
    pub title: BookTitle,
    pub author: AuthorName,
    pub cover_url: Option<String>,
    pub book_type: BookType,
}
