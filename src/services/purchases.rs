use crate::domain::types::{BookId, UserId};
use crate::dto::purchases::{AuthorBookSalesDto, BookSalesDto, PurchaseDto, PurchaseWithBookDto};
use crate::forms::purchases::CreatePurchaseFormPayload;
use crate::repository::errors::RepositoryError;
use crate::repository::{PurchaseReader, PurchaseWriter};

use super::{ServiceError, ServiceResult};

pub fn check_ownership<R>(book_id: i32, user_id: UserId, repo: &R) -> ServiceResult<bool>
where
    R: PurchaseReader,
{
    let book_id = BookId::new(book_id).map_err(|_| ServiceError::NotFound)?;

    match repo.check_ownership(user_id, book_id) {
        Ok(owned) => Ok(owned),
        Err(e) => {
            log::error!("Failed to check ownership: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Records a purchase for the authenticated user.
///
/// A duplicate attempt surfaces as [`ServiceError::AlreadyOwned`] whether it
/// was caught by the repository pre-check or by the storage uniqueness
/// constraint under a race.
pub fn create_purchase<R>(
    payload: CreatePurchaseFormPayload,
    user_id: UserId,
    repo: &R,
) -> ServiceResult<PurchaseDto>
where
    R: PurchaseWriter,
{
    let new_purchase = payload.into_new_purchase(user_id);
    match repo.create_purchase(&new_purchase) {
        Ok(purchase) => Ok(purchase.into()),
        Err(RepositoryError::AlreadyOwned) => Err(ServiceError::AlreadyOwned),
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to create purchase: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_user_purchases<R>(user_id: UserId, repo: &R) -> ServiceResult<Vec<PurchaseWithBookDto>>
where
    R: PurchaseReader,
{
    match repo.list_user_purchases(user_id) {
        Ok(purchases) => Ok(purchases.into_iter().map(Into::into).collect()),
        Err(e) => {
            log::error!("Failed to list purchases: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_book_sales<R>(book_id: i32, repo: &R) -> ServiceResult<BookSalesDto>
where
    R: PurchaseReader,
{
    let book_id = BookId::new(book_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_book_sales(book_id) {
        Ok(sales) => Ok(sales.into()),
        Err(e) => {
            log::error!("Failed to get book sales: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_author_sales<R>(user_id: UserId, repo: &R) -> ServiceResult<Vec<AuthorBookSalesDto>>
where
    R: PurchaseReader,
{
    match repo.get_author_sales(user_id) {
        Ok(report) => Ok(report.into_iter().map(Into::into).collect()),
        Err(e) => {
            log::error!("Failed to get author sales: {e}");
            Err(ServiceError::Internal)
        }
    }
}
