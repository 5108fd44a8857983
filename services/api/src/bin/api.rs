//! services/api/src/bin/api.rs

use chrono::Duration;
use journal_api::{
    adapters::{db::DbAdapter, emotion_llm::ChatCompletionEmotionAdapter},
    config::Config,
    error::ApiError,
    token::TokenService,
    web::{build_router, state::AppState},
};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool));
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Initialize Service Adapters ---
    let api_key = config
        .openrouter_api_key
        .clone()
        .ok_or_else(|| ApiError::Internal("OPENROUTER_API_KEY is required".to_string()))?;
    let analyzer = Arc::new(ChatCompletionEmotionAdapter::new(
        reqwest::Client::new(),
        config.llm_api_base.clone(),
        api_key,
        config.emotion_model.clone(),
    ));

    let tokens = Arc::new(TokenService::new(
        &config.jwt_secret,
        Duration::hours(config.token_ttl_hours),
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        db: db_adapter,
        analyzer,
        tokens,
    });

    // --- 5. Create the Web Router ---
    let app = build_router(app_state);

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "OpenAPI document available at http://{}/api-docs/openapi.json",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
