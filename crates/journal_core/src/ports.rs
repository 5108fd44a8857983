//! crates/journal_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;

use crate::domain::{EmotionAnalysis, JournalEntry, NewJournalEntry, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Failed to parse analysis: {0}")]
    Parse(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- User Management ---

    /// Inserts a user. Fails with `Conflict` if the email is already registered.
    async fn create_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> PortResult<User>;

    async fn get_user_credentials_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn get_user_by_id(&self, user_id: i64) -> PortResult<User>;

    // --- Journal Management ---

    /// Stores an entry stamped with the current server time.
    async fn create_entry(&self, user_id: i64, entry: NewJournalEntry) -> PortResult<JournalEntry>;

    /// All entries owned by `user_id`, newest first. Empty when there are none.
    async fn list_entries(&self, user_id: i64) -> PortResult<Vec<JournalEntry>>;
}

#[async_trait]
pub trait EmotionAnalysisService: Send + Sync {
    /// Scores the emotional tone of a single piece of journal text.
    async fn analyze_emotion(&self, content: &str) -> PortResult<EmotionAnalysis>;
}
