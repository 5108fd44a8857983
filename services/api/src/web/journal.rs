//! services/api/src/web/journal.rs
//!
//! Journal endpoints: storing and listing entries, and emotion analysis of
//! single entries or a week's worth of them.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use journal_core::{
    analysis::weekly_analysis,
    domain::{DailyEmotion, EmotionAnalysis, JournalEntry, NewJournalEntry},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{reject, HttpError};
use crate::web::json_body;
use crate::web::state::{AppState, AuthUser};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateEntryRequest {
    pub content: String,
    #[serde(default)]
    pub emotion: Option<String>,
    #[serde(default, alias = "emotionScore")]
    pub emotion_score: Option<i64>,
    #[serde(default)]
    pub advice: Option<String>,
}

/// A stored entry as returned to clients.
#[derive(Serialize, ToSchema)]
pub struct JournalEntryResponse {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub emotion: Option<String>,
    #[serde(rename = "emotionScore")]
    pub emotion_score: Option<i64>,
    pub advice: Option<String>,
    /// Creation time of the entry.
    pub date: DateTime<Utc>,
}

impl From<JournalEntry> for JournalEntryResponse {
    fn from(entry: JournalEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            content: entry.content,
            emotion: entry.emotion,
            emotion_score: entry.emotion_score,
            advice: entry.advice,
            date: entry.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    pub content: String,
}

#[derive(Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub emotion: String,
    #[serde(rename = "emotionScore")]
    pub emotion_score: i64,
    pub advice: String,
}

impl From<EmotionAnalysis> for AnalyzeResponse {
    fn from(analysis: EmotionAnalysis) -> Self {
        Self {
            emotion: analysis.emotion,
            emotion_score: analysis.score,
            advice: analysis.advice,
        }
    }
}

/// One entry of a weekly batch. Other fields a client sends along are ignored.
#[derive(Deserialize, ToSchema)]
pub struct WeeklyEntry {
    pub content: String,
}

#[derive(Deserialize, ToSchema)]
pub struct WeeklyAnalysisRequest {
    pub entries: Vec<WeeklyEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct DailyEmotionResponse {
    pub day: String,
    pub score: i64,
    pub emotion: String,
}

impl From<DailyEmotion> for DailyEmotionResponse {
    fn from(daily: DailyEmotion) -> Self {
        Self {
            day: daily.day,
            score: daily.score,
            emotion: daily.emotion,
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /journal - All of the caller's entries, newest first
#[utoipa::path(
    get,
    path = "/journal",
    responses(
        (status = 200, description = "Entries of the authenticated user, possibly empty", body = [JournalEntryResponse]),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_entries_handler(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<JournalEntryResponse>>, HttpError> {
    let entries = state
        .db
        .list_entries(auth.user_id)
        .await
        .map_err(|e| reject(e, "Failed to fetch entries"))?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// POST /journal - Store a new entry for the caller
#[utoipa::path(
    post,
    path = "/journal",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry stored", body = JournalEntryResponse),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_entry_handler(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let req = json_body(payload)?;
    let entry = state
        .db
        .create_entry(
            auth.user_id,
            NewJournalEntry {
                content: req.content,
                emotion: req.emotion,
                emotion_score: req.emotion_score,
                advice: req.advice,
            },
        )
        .await
        .map_err(|e| reject(e, "Failed to save journal"))?;

    info!(user_id = auth.user_id, entry_id = entry.id, "journal entry stored");
    Ok((StatusCode::CREATED, Json(JournalEntryResponse::from(entry))))
}

/// POST /journal/analyze - Emotion analysis of a single text
#[utoipa::path(
    post,
    path = "/journal/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis of the submitted text", body = AnalyzeResponse),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Analysis failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, HttpError> {
    let req = json_body(payload)?;
    let analysis = state
        .analyzer
        .analyze_emotion(&req.content)
        .await
        .map_err(|e| reject(e, "Failed to analyze emotion"))?;
    Ok(Json(analysis.into()))
}

/// POST /journal/weekly-analysis - Per-day emotion scores for a batch of texts
#[utoipa::path(
    post,
    path = "/journal/weekly-analysis",
    request_body = WeeklyAnalysisRequest,
    responses(
        (status = 200, description = "One labelled result per entry, in input order", body = [DailyEmotionResponse]),
        (status = 400, description = "Invalid request body"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 500, description = "Analysis of at least one entry failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn weekly_analysis_handler(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    payload: Result<Json<WeeklyAnalysisRequest>, JsonRejection>,
) -> Result<Json<Vec<DailyEmotionResponse>>, HttpError> {
    let req = json_body(payload)?;
    let contents: Vec<String> = req.entries.into_iter().map(|e| e.content).collect();

    let results = weekly_analysis(state.analyzer.as_ref(), &contents)
        .await
        .map_err(|e| reject(e, "Emotion analysis failed"))?;

    info!(user_id = auth.user_id, days = results.len(), "weekly analysis complete");
    Ok(Json(results.into_iter().map(Into::into).collect()))
}
