//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and the mapping
//! from port errors to HTTP responses.

use axum::http::StatusCode;
use journal_core::ports::PortError;
use tracing::error;

use crate::config::ConfigError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The rejection type every handler returns: a status and a plain-text body.
pub type HttpError = (StatusCode, String);

/// Maps a port error to its HTTP status.
pub fn status_for(err: &PortError) -> StatusCode {
    match err {
        PortError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PortError::Unauthorized => StatusCode::UNAUTHORIZED,
        PortError::Conflict(_) => StatusCode::CONFLICT,
        PortError::NotFound(_) => StatusCode::NOT_FOUND,
        PortError::Storage(_)
        | PortError::Upstream(_)
        | PortError::Parse(_)
        | PortError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Logs `err` and converts it into a handler rejection.
///
/// Client errors echo the port message; server errors only expose `public_message`.
pub fn reject(err: PortError, public_message: &str) -> HttpError {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("{}: {:?}", public_message, err);
        (status, public_message.to_string())
    } else {
        (status, err.to_string())
    }
}
