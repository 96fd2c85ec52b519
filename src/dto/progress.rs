use serde::Serialize;

use crate::domain::progress::{ProgressWithBook, ReadingProgress};

/// Response shape for a reading-progress row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressDto {
    pub user_id: i32,
    pub book_id: i32,
    pub last_position: f64,
    pub completion_percent: f64,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<ReadingProgress> for ProgressDto {
    fn from(value: ReadingProgress) -> Self {
        Self {
            user_id: value.user_id.get(),
            book_id: value.book_id.get(),
            last_position: value.last_position.get(),
            completion_percent: value.completion_percent.get(),
            updated_at: value.updated_at,
        }
    }
}

/// A progress row with the metadata of the book it tracks.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressWithBookDto {
    #[serde(flatten)]
    pub progress: ProgressDto,
    pub title: String,
    pub author: String,
    pub cover_url: Option<String>,
    pub book_type: String,
}

impl From<ProgressWithBook> for ProgressWithBookDto {
    fn from(value: ProgressWithBook) -> Self {
        Self {
            progress: value.progress.into(),
            title: value.title.into_inner(),
            author: value.author.into_inner(),
            cover_url: value.cover_url,
            book_type: value.book_type.as_str().to_string(),
        }
    }
}
