//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the SQLite database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use journal_core::domain::{JournalEntry, NewJournalEntry, User, UserCredentials};
use journal_core::ports::{DatabaseService, PortError, PortResult};
use sqlx::{FromRow, SqlitePool};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn storage_error(e: sqlx::Error) -> PortError {
    PortError::Storage(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    id: i64,
    email: String,
    username: String,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            email: self.email,
            username: self.username,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    id: i64,
    email: String,
    username: String,
    password_hash: String,
}
impl CredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            id: self.id,
            email: self.email,
            username: self.username,
            password_hash: self.password_hash,
        }
    }
}

#[derive(FromRow)]
struct JournalEntryRecord {
    id: i64,
    user_id: i64,
    content: String,
    emotion: Option<String>,
    emotion_score: Option<i64>,
    advice: Option<String>,
    created_at: DateTime<Utc>,
}
impl JournalEntryRecord {
    fn to_domain(self) -> JournalEntry {
        JournalEntry {
            id: self.id,
            user_id: self.user_id,
            content: self.content,
            emotion: self.emotion,
            emotion_score: self.emotion_score,
            advice: self.advice,
            created_at: self.created_at,
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (email, username, password_hash) VALUES (?, ?, ?) RETURNING id, email, username",
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                PortError::Conflict(format!("Email {} is already registered", email))
            }
            _ => storage_error(e),
        })?;
        Ok(record.to_domain())
    }

    async fn get_user_credentials_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT id, email, username, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("User {} not found", email)),
            _ => storage_error(e),
        })?;
        Ok(record.to_domain())
    }

    async fn get_user_by_id(&self, user_id: i64) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, username FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("User {} not found", user_id)),
            _ => storage_error(e),
        })?;
        Ok(record.to_domain())
    }

    async fn create_entry(&self, user_id: i64, entry: NewJournalEntry) -> PortResult<JournalEntry> {
        let record = sqlx::query_as::<_, JournalEntryRecord>(
            "INSERT INTO journal_entries (user_id, content, emotion, emotion_score, advice, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING id, user_id, content, emotion, emotion_score, advice, created_at",
        )
        .bind(user_id)
        .bind(entry.content)
        .bind(entry.emotion)
        .bind(entry.emotion_score)
        .bind(entry.advice)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(record.to_domain())
    }

    async fn list_entries(&self, user_id: i64) -> PortResult<Vec<JournalEntry>> {
        let records = sqlx::query_as::<_, JournalEntryRecord>(
            "SELECT id, user_id, content, emotion, emotion_score, advice, created_at \
             FROM journal_entries WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let entries = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(entries)
    }
}
