//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification and the handler that
//! serves it.

use axum::Json;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::web::{auth, journal};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup_handler,
        auth::signin_handler,
        auth::me_handler,
        journal::list_entries_handler,
        journal::create_entry_handler,
        journal::analyze_handler,
        journal::weekly_analysis_handler,
    ),
    components(
        schemas(
            auth::SignupRequest,
            auth::SigninRequest,
            auth::SigninResponse,
            auth::UserResponse,
            journal::CreateEntryRequest,
            journal::JournalEntryResponse,
            journal::AnalyzeRequest,
            journal::AnalyzeResponse,
            journal::WeeklyEntry,
            journal::WeeklyAnalysisRequest,
            journal::DailyEmotionResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Mood Journal API", description = "Journaling with AI emotion analysis.")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// GET /api-docs/openapi.json
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
