use chrono::Utc;
use diesel::prelude::*;

use crate::domain::progress::{ProgressUpdate, ProgressWithBook, ReadingProgress};
use crate::domain::types::{BookId, UserId};
use crate::models::progress::{
    NewReadingProgress as DbNewProgress, ReadingProgress as DbProgress,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProgressReader, ProgressWriter};

impl ProgressReader for DieselRepository {
    fn get_progress(
        &self,
        user_id: UserId,
        book_id: BookId,
    ) -> RepositoryResult<Option<ReadingProgress>> {
        use crate::schema::reading_progress;

        let mut conn = self.conn()?;

        let row = reading_progress::table
            .filter(reading_progress::user_id.eq(user_id.get()))
            .filter(reading_progress::book_id.eq(book_id.get()))
            .first::<DbProgress>(&mut conn)
            .optional()?;

        Ok(row.map(TryInto::try_into).transpose()?)
    }

    fn list_user_progress(&self, user_id: UserId) -> RepositoryResult<Vec<ProgressWithBook>> {
        use crate::schema::{books, reading_progress};

        let mut conn = self.conn()?;

        let rows: Vec<(DbProgress, String, String, Option<String>, String)> =
            reading_progress::table
                .inner_join(books::table)
                .filter(reading_progress::user_id.eq(user_id.get()))
                .order(reading_progress::updated_at.desc())
                .select((
                    DbProgress::as_select(),
                    books::title,
                    books::author,
                    books::cover_url,
                    books::book_type,
                ))
                .load(&mut conn)?;

        rows.into_iter()
            .map(|row| Ok(ProgressWithBook::try_from(row)?))
            .collect()
    }
}

impl ProgressWriter for DieselRepository {
    fn upsert_progress(&self, update: &ProgressUpdate) -> RepositoryResult<ReadingProgress> {
        use crate::schema::reading_progress;

        let mut conn = self.conn()?;

        let row = DbNewProgress {
            user_id: update.user_id.get(),
            book_id: update.book_id.get(),
            last_position: update.last_position.get(),
            completion_percent: update.completion_percent.get(),
            updated_at: Utc::now().naive_utc(),
        };

        // Single conditional insert-or-update keyed by (user_id, book_id).
        // Concurrent reports for the same pair cannot create a duplicate
        // row; the last committed write wins.
        let upserted = diesel::insert_into(reading_progress::table)
            .values(&row)
            .on_conflict((reading_progress::user_id, reading_progress::book_id))
            .do_update()
            .set((
                reading_progress::last_position.eq(row.last_position),
                reading_progress::completion_percent.eq(row.completion_percent),
                reading_progress::updated_at.eq(row.updated_at),
            ))
            .returning(DbProgress::as_returning())
            .get_result::<DbProgress>(&mut conn)?;

        Ok(upserted.try_into()?)
    }
}
