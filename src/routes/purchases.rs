use actix_web::{HttpResponse, Responder, get, post, web};

use crate::db::DbPool;
use crate::forms::purchases::{CreatePurchaseForm, CreatePurchaseFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{AuthenticatedUser, error_response};
use crate::services::ServiceError;
use crate::services::{payments, purchases};

#[get("/v1/books/{id}/ownership")]
pub async fn check_ownership(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match purchases::check_ownership(path.into_inner(), user.user_id, &repo) {
        Ok(owned) => HttpResponse::Ok().json(serde_json::json!({ "owned": owned })),
        Err(e) => error_response(e),
    }
}

#[post("/v1/books/{id}/payment-intent")]
pub async fn create_payment_intent(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match payments::create_intent(path.into_inner(), user.user_id, &repo) {
        Ok(intent) => HttpResponse::Created().json(intent),
        Err(e) => error_response(e),
    }
}

#[post("/v1/purchases")]
pub async fn create_purchase(
    form: web::Json<CreatePurchaseForm>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let payload = match CreatePurchaseFormPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let repo = DieselRepository::new(pool.get_ref().clone());

    match purchases::create_purchase(payload, user.user_id, &repo) {
        Ok(purchase) => HttpResponse::Created().json(purchase),
        Err(e) => error_response(e),
    }
}

#[get("/v1/my/purchases")]
pub async fn my_purchases(user: AuthenticatedUser, pool: web::Data<DbPool>) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match purchases::list_user_purchases(user.user_id, &repo) {
        Ok(purchases) => HttpResponse::Ok().json(purchases),
        Err(e) => error_response(e),
    }
}

#[get("/v1/books/{id}/sales")]
pub async fn book_sales(path: web::Path<i32>, pool: web::Data<DbPool>) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match purchases::get_book_sales(path.into_inner(), &repo) {
        Ok(sales) => HttpResponse::Ok().json(sales),
        Err(e) => error_response(e),
    }
}

#[get("/v1/my/sales")]
pub async fn my_sales(user: AuthenticatedUser, pool: web::Data<DbPool>) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match purchases::get_author_sales(user.user_id, &repo) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(e),
    }
}
