use actix_web::{HttpResponse, Responder, get, patch, post, web};

use crate::db::DbPool;
use crate::forms::books::{CreateBookForm, CreateBookFormPayload, UpdateBookForm, UpdateBookFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{AuthenticatedUser, error_response};
use crate::services::ServiceError;
use crate::services::books::{self, BookListParams};

#[get("/v1/books")]
pub async fn list_books(
    params: web::Query<BookListParams>,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match books::list_books(params.into_inner(), &repo) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(e),
    }
}

#[get("/v1/books/{id}")]
pub async fn get_book(path: web::Path<i32>, pool: web::Data<DbPool>) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match books::get_book(path.into_inner(), &repo) {
        Ok(book) => HttpResponse::Ok().json(book),
        Err(e) => error_response(e),
    }
}

#[post("/v1/books")]
pub async fn create_book(
    form: web::Json<CreateBookForm>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let payload = match CreateBookFormPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let repo = DieselRepository::new(pool.get_ref().clone());

    match books::create_book(payload, user.user_id, &repo) {
        Ok(book) => HttpResponse::Created().json(book),
        Err(e) => error_response(e),
    }
}

#[patch("/v1/books/{id}")]
pub async fn update_book(
    path: web::Path<i32>,
    form: web::Json<UpdateBookForm>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let payload = match UpdateBookFormPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let repo = DieselRepository::new(pool.get_ref().clone());

    match books::update_book(path.into_inner(), payload, user.user_id, &repo) {
        Ok(book) => HttpResponse::Ok().json(book),
        Err(e) => error_response(e),
    }
}

#[get("/v1/my/books")]
pub async fn my_books(user: AuthenticatedUser, pool: web::Data<DbPool>) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match books::list_books_by_owner(user.user_id, &repo) {
        Ok(books) => HttpResponse::Ok().json(books),
        Err(e) => error_response(e),
    }
}
