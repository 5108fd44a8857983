pub mod auth;
pub mod journal;
pub mod middleware;
pub mod rest;
pub mod router;
pub mod state;

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};

use crate::error::HttpError;

pub use middleware::require_auth;
pub use router::build_router;

/// Unwraps a JSON body, turning every kind of body rejection (bad syntax,
/// missing fields, wrong content type) into a plain 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", rejection.body_text()),
            )
        })
}
