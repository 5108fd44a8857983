//! crates/journal_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};

/// The public profile of a registered user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
}

// Only used internally for login - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// A single journal submission owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub emotion: Option<String>,
    pub emotion_score: Option<i64>,
    pub advice: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The caller-supplied part of an entry. The optional analysis fields are
/// stored exactly as given; nothing checks them against an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewJournalEntry {
    pub content: String,
    pub emotion: Option<String>,
    pub emotion_score: Option<i64>,
    pub advice: Option<String>,
}

/// The `{emotion, score, advice}` triple produced by the language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionAnalysis {
    pub emotion: String,
    /// Intensity in `0..=100`.
    pub score: i64,
    pub advice: String,
}

/// One labelled point of a weekly analysis ("Day 1", "Day 2", ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEmotion {
    pub day: String,
    pub score: i64,
    pub emotion: String,
}
