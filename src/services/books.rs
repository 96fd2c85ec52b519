use serde::Deserialize;

use crate::domain::types::{BookId, BookType, CategoryName, UserId};
use crate::dto::books::{BookDto, BookPageDto};
use crate::forms::books::{CreateBookFormPayload, UpdateBookFormPayload};
use crate::pagination::DEFAULT_PAGE_LIMIT;
use crate::repository::{BookListQuery, BookReader, BookWriter};

use super::{ServiceError, ServiceResult};

/// Query parameters accepted by the catalog listing endpoint.
#[derive(Deserialize, Debug)]
pub struct BookListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub book_type: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Core business logic for the catalog listing endpoint: optional search,
/// category and type filters, limit/offset paging, newest first.
pub fn list_books<R>(params: BookListParams, repo: &R) -> ServiceResult<BookPageDto>
where
    R: BookReader,
{
    let mut query = BookListQuery::default().paginate(
        params.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        params.offset.unwrap_or(0),
    );

    if let Some(search) = params.search.filter(|s| !s.is_empty()) {
        query = query.search(search);
    }
    if let Some(category) = params.category.filter(|c| !c.is_empty()) {
        query = query.category(CategoryName::new(category)?);
    }
    if let Some(book_type) = params.book_type.filter(|t| !t.is_empty()) {
        query = query.book_type(BookType::try_from(book_type.as_str())?);
    }

    match repo.list_books(query) {
        Ok((total, books)) => Ok(BookPageDto {
            total,
            books: books.into_iter().map(BookDto::from).collect(),
        }),
        Err(e) => {
            log::error!("Failed to list books: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_book<R>(book_id: i32, repo: &R) -> ServiceResult<BookDto>
where
    R: BookReader,
{
    let book_id = BookId::new(book_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_book_by_id(book_id) {
        Ok(Some(book)) => Ok(book.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get book: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_book<R>(
    payload: CreateBookFormPayload,
    user_id: UserId,
    repo: &R,
) -> ServiceResult<BookDto>
where
    R: BookWriter,
{
    let new_book = payload.into_new_book(user_id);
    match repo.create_book(&new_book) {
        Ok(book) => Ok(book.into()),
        Err(e) => {
            log::error!("Failed to create book: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Applies explicit field updates. Only the uploading user may edit a book.
pub fn update_book<R>(
    book_id: i32,
    payload: UpdateBookFormPayload,
    user_id: UserId,
    repo: &R,
) -> ServiceResult<BookDto>
where
    R: BookReader + BookWriter,
{
    let book_id = BookId::new(book_id).map_err(|_| ServiceError::NotFound)?;

    let book = match repo.get_book_by_id(book_id) {
        Ok(Some(book)) => book,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get book: {e}");
            return Err(ServiceError::Internal);
        }
    };
    if book.user_id != user_id {
        return Err(ServiceError::Unauthorized);
    }

    match repo.update_book(book_id, &payload.changes) {
        Ok(book) => Ok(book.into()),
        Err(e) => {
            log::error!("Failed to update book: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_books_by_owner<R>(user_id: UserId, repo: &R) -> ServiceResult<Vec<BookDto>>
where
    R: BookReader,
{
    match repo.list_books_by_owner(user_id) {
        Ok(books) => Ok(books.into_iter().map(BookDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list books by owner: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::books::{CreateBookForm, CreateBookFormPayload};
    use crate::repository::test::TestRepository;

    fn sample_payload(categories: Vec<&str>) -> CreateBookFormPayload {
        CreateBookForm {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: None,
            price: 9.99,
            book_type: "ebook".to_string(),
            categories: categories.into_iter().map(String::from).collect(),
            cover_url: None,
            file_url: None,
            sample_url: None,
            audio_url: None,
        }
        .try_into()
        .unwrap()
    }

    #[test]
    fn created_book_reports_deduplicated_categories() {
        let repo = TestRepository::new();
        let user_id = UserId::new(1).unwrap();

        let created = create_book(
            sample_payload(vec!["Sci-Fi", "Classics", "Sci-Fi"]),
            user_id,
            &repo,
        )
        .unwrap();
        assert_eq!(created.categories, vec!["Sci-Fi", "Classics"]);

        let fetched = get_book(created.id, &repo).unwrap();
        assert_eq!(fetched.categories, vec!["Sci-Fi", "Classics"]);
    }

    #[test]
    fn get_book_signals_absence_as_not_found() {
        let repo = TestRepository::new();
        assert_eq!(get_book(42, &repo).unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn update_book_requires_ownership() {
        let repo = TestRepository::new();
        let owner = UserId::new(1).unwrap();
        let other = UserId::new(2).unwrap();
        let created = create_book(sample_payload(vec![]), owner, &repo).unwrap();

        let payload = crate::forms::books::UpdateBookForm {
            title: None,
            author: None,
            description: None,
            price: Some(14.99),
        }
        .try_into()
        .unwrap();

        let err = update_book(created.id, payload, other, &repo).unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);
    }

    #[test]
    fn list_books_filters_by_search() {
        let repo = TestRepository::new();
        let user_id = UserId::new(1).unwrap();
        create_book(sample_payload(vec![]), user_id, &repo).unwrap();

        let params = BookListParams {
            search: Some("dune".to_string()),
            category: None,
            book_type: None,
            limit: None,
            offset: None,
        };
        let page = list_books(params, &repo).unwrap();
        assert_eq!(page.total, 1);

        let params = BookListParams {
            search: Some("foundation".to_string()),
            category: None,
            book_type: None,
            limit: None,
            offset: None,
        };
        let page = list_books(params, &repo).unwrap();
        assert_eq!(page.total, 0);
    }
}
