use actix_web::{HttpResponse, Responder, get, put, web};

use crate::db::DbPool;
use crate::forms::progress::{UpdateProgressForm, UpdateProgressFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{AuthenticatedUser, error_response};
use crate::services::ServiceError;
use crate::services::progress;

#[get("/v1/books/{id}/progress")]
pub async fn get_progress(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match progress::get_progress(path.into_inner(), user.user_id, &repo) {
        Ok(progress) => HttpResponse::Ok().json(progress),
        Err(e) => error_response(e),
    }
}

#[put("/v1/progress")]
pub async fn update_progress(
    form: web::Json<UpdateProgressForm>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let payload = match UpdateProgressFormPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return error_response(ServiceError::from(e)),
    };

    let repo = DieselRepository::new(pool.get_ref().clone());

    match progress::update_progress(payload, user.user_id, &repo) {
        Ok(progress) => HttpResponse::Ok().json(progress),
        Err(e) => error_response(e),
    }
}

#[get("/v1/my/progress")]
pub async fn my_progress(user: AuthenticatedUser, pool: web::Data<DbPool>) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    match progress::list_user_progress(user.user_id, &repo) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(e),
    }
}
