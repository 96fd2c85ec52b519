use crate::domain::types::{BookId, UserId};
use crate::dto::progress::{ProgressDto, ProgressWithBookDto};
use crate::forms::progress::UpdateProgressFormPayload;
use crate::repository::{ProgressReader, ProgressWriter};

use super::{ServiceError, ServiceResult};

pub fn get_progress<R>(book_id: i32, user_id: UserId, repo: &R) -> ServiceResult<ProgressDto>
where
    R: ProgressReader,
{
    let book_id = BookId::new(book_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_progress(user_id, book_id) {
        Ok(Some(progress)) => Ok(progress.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get progress: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Records a progress report for the authenticated user. The repository
/// performs a strict upsert keyed by (user, book).
pub fn update_progress<R>(
    payload: UpdateProgressFormPayload,
    user_id: UserId,
    repo: &R,
) -> ServiceResult<ProgressDto>
where
    R: ProgressWriter,
{
    let update = payload.into_progress_update(user_id);
    match repo.upsert_progress(&update) {
        Ok(progress) => Ok(progress.into()),
        Err(e) => {
            log::error!("Failed to update progress: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_user_progress<R>(user_id: UserId, repo: &R) -> ServiceResult<Vec<ProgressWithBookDto>>
where
    R: ProgressReader,
{
    match repo.list_user_progress(user_id) {
        Ok(rows) => Ok(rows.into_iter().map(Into::into).collect()),
        Err(e) => {
            log::error!("Failed to list progress: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::progress::UpdateProgressForm;
    use crate::repository::test::TestRepository;

    fn payload(book_id: i32, position: f64, percent: f64) -> UpdateProgressFormPayload {
        UpdateProgressForm {
            book_id,
            last_position: position,
            completion_percent: percent,
        }
        .try_into()
        .unwrap()
    }

    #[test]
    fn repeated_updates_keep_a_single_row() {
        let repo = TestRepository::new();
        let user_id = UserId::new(42).unwrap();

        update_progress(payload(1, 10.0, 5.0), user_id, &repo).unwrap();
        let second = update_progress(payload(1, 250.0, 62.5), user_id, &repo).unwrap();

        assert_eq!(second.last_position, 250.0);
        assert_eq!(second.completion_percent, 62.5);
        assert_eq!(repo.progress_rows().len(), 1);
    }

    #[test]
    fn out_of_range_percent_never_reaches_storage() {
        let repo = TestRepository::new();

        let form = UpdateProgressForm {
            book_id: 1,
            last_position: 10.0,
            completion_percent: 101.0,
        };
        assert!(UpdateProgressFormPayload::try_from(form).is_err());
        assert!(repo.progress_rows().is_empty());
    }

    #[test]
    fn absent_progress_is_not_found() {
        let repo = TestRepository::new();
        let user_id = UserId::new(42).unwrap();

        let err = get_progress(1, user_id, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }
}
