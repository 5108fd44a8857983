//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::web::state::{AppState, AuthUser};

/// Middleware that validates the `Authorization: Bearer` token and extracts the user id.
///
/// If valid, inserts an `AuthUser` into request extensions for handlers to use.
/// If invalid, expired or missing, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let unauthorized = || (StatusCode::UNAUTHORIZED, "Unauthorized".to_string());

    // 1. Extract authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(unauthorized)?;

    // 2. Strip the bearer scheme
    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(unauthorized)?;

    // 3. Verify signature and expiry; no database access
    let user_id = state.tokens.verify(token).map_err(|_| unauthorized())?;

    // 4. Insert the identity into request extensions
    req.extensions_mut().insert(AuthUser { user_id });

    // 5. Continue to the handler
    Ok(next.run(req).await)
}
