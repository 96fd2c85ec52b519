use chrono::Utc;

use crate::domain::payment::PaymentIntent;
use crate::domain::types::{BookId, PaymentIntentRef, UserId};
use crate::dto::purchases::PaymentIntentDto;
use crate::repository::{BookReader, PurchaseReader};

use super::{ServiceError, ServiceResult};

/// Fabricates a payment intent for the mock provider.
///
/// Ownership is pre-checked here so the UI can refuse checkout early; the
/// purchase insert re-checks under its own transaction. The reference is an
/// opaque string with no meaning to any real payment network.
pub fn create_intent<R>(book_id: i32, user_id: UserId, repo: &R) -> ServiceResult<PaymentIntentDto>
where
    R: BookReader + PurchaseReader,
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

    match repo.check_ownership(user_id, book_id) {
        Ok(false) => {}
        Ok(true) => return Err(ServiceError::AlreadyOwned),
        Err(e) => {
            log::error!("Failed to check ownership: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let reference = PaymentIntentRef::new(format!(
        "pi_mock_{}_{}_{}",
        user_id,
        book_id,
        Utc::now().timestamp_millis()
    ))?;

    Ok(PaymentIntent {
        book_id,
        reference,
        amount_minor: (book.price.get() * 100.0).round() as i64,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::books::CreateBookForm;
    use crate::forms::purchases::CreatePurchaseForm;
    use crate::repository::test::TestRepository;
    use crate::services::books::create_book;
    use crate::services::purchases::create_purchase;

    fn seed_book(repo: &TestRepository, price: f64) -> i32 {
        let payload = CreateBookForm {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: None,
            price,
            book_type: "ebook".to_string(),
            categories: vec![],
            cover_url: None,
            file_url: None,
            sample_url: None,
            audio_url: None,
        }
        .try_into()
        .unwrap();
        create_book(payload, UserId::new(1).unwrap(), repo).unwrap().id
    }

    #[test]
    fn intent_converts_price_to_minor_units() {
        let repo = TestRepository::new();
        let book_id = seed_book(&repo, 9.99);

        let intent = create_intent(book_id, UserId::new(42).unwrap(), &repo).unwrap();
        assert_eq!(intent.amount_minor, 999);
        assert!(intent.reference.starts_with("pi_mock_"));
    }

    #[test]
    fn intent_refused_for_owned_book() {
        let repo = TestRepository::new();
        let buyer = UserId::new(42).unwrap();
        let book_id = seed_book(&repo, 9.99);

        let payload = CreatePurchaseForm {
            book_id,
            payment_method: "card".to_string(),
            payment_intent: "pi_123".to_string(),
        }
        .try_into()
        .unwrap();
        create_purchase(payload, buyer, &repo).unwrap();

        let err = create_intent(book_id, buyer, &repo).unwrap_err();
        assert_eq!(err, ServiceError::AlreadyOwned);
    }
}
