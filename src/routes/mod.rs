use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, error::ErrorUnauthorized};

use crate::domain::types::UserId;
use crate::services::ServiceError;

pub mod books;
pub mod progress;
pub mod purchases;

/// Identity of the caller, established by upstream auth middleware.
///
/// Token validation happens before requests reach this service; by the time
/// a request arrives here the user id is trusted and carried in the
/// `X-User-Id` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get("X-User-Id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<i32>().ok())
            .and_then(|value| UserId::new(value).ok());

        ready(match user_id {
            Some(user_id) => Ok(Self { user_id }),
            None => Err(ErrorUnauthorized("missing or invalid X-User-Id header")),
        })
    }
}

/// Maps a service error onto an HTTP response.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        ServiceError::Unauthorized => HttpResponse::Forbidden().json(body),
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::AlreadyOwned => HttpResponse::Conflict().json(body),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}
