//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the authenticated identity that
//! the auth gate hands to protected handlers.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use journal_core::ports::{DatabaseService, EmotionAnalysisService};
use std::sync::Arc;

use crate::token::TokenService;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub analyzer: Arc<dyn EmotionAnalysisService>,
    pub tokens: Arc<TokenService>,
}

//=========================================================================================
// AuthUser (Verified Identity For One Request)
//=========================================================================================

/// The identity extracted from a verified bearer token.
///
/// Inserted into request extensions by `require_auth`; protected handlers take
/// it as an argument and are rejected with 401 if it is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()))
    }
}
