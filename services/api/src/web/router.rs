//! services/api/src/web/router.rs
//!
//! Assembles the route table: public routes, bearer-protected routes, and the
//! CORS, tracing and body-limit layers applied to all of them.

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::web::{
    auth::{me_handler, signin_handler, signup_handler},
    journal::{
        analyze_handler, create_entry_handler, list_entries_handler, weekly_analysis_handler,
    },
    middleware::require_auth,
    rest::openapi_handler,
    state::AppState,
};

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn build_router(app_state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/signup", post(signup_handler))
        .route("/signin", post(signin_handler))
        .route("/api-docs/openapi.json", get(openapi_handler));

    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        .route("/me", get(me_handler))
        .route("/journal", get(list_entries_handler).post(create_entry_handler))
        .route("/journal/analyze", post(analyze_handler))
        .route("/journal/weekly-analysis", post(weekly_analysis_handler))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
