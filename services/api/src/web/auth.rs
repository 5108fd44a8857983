//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup, signin, and profile lookup.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use journal_core::{domain::User, ports::PortError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::error::{reject, HttpError};
use crate::web::json_body;
use crate::web::state::{AppState, AuthUser};

const MAX_USERNAME_CHARS: usize = 64;
const MIN_PASSWORD_CHARS: usize = 8;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// A user's public profile. Never includes the password hash.
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SigninResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

//=========================================================================================
// Input Validation
//=========================================================================================

/// A signup request that passed validation, with the email normalized.
#[derive(Debug, PartialEq, Eq)]
struct ValidSignup {
    email: String,
    username: String,
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn validate_signup(req: &SignupRequest) -> Result<ValidSignup, PortError> {
    let email = normalize_email(&req.email);
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !well_formed {
        return Err(PortError::InvalidInput("email is not a valid address".to_string()));
    }

    let username = req.username.trim();
    if username.is_empty() || username.chars().count() > MAX_USERNAME_CHARS {
        return Err(PortError::InvalidInput(format!(
            "username must be 1 to {} characters",
            MAX_USERNAME_CHARS
        )));
    }

    if req.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(PortError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }

    Ok(ValidSignup {
        email,
        username: username.to_string(),
    })
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /signup - Create a new user account
#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let req = json_body(payload)?;

    // 1. Validate fields
    let valid = validate_signup(&req).map_err(|e| reject(e, "Invalid signup request"))?;

    // 2. Hash the password
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to hash password".to_string())
        })?
        .to_string();

    // 3. Create user in database
    let user = state
        .db
        .create_user(&valid.email, &valid.username, &password_hash)
        .await
        .map_err(|e| reject(e, "Failed to create user"))?;

    info!(user_id = user.id, "user signed up");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /signin - Verify credentials and mint a bearer token
#[utoipa::path(
    post,
    path = "/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signin successful", body = SigninResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signin_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let req = json_body(payload)?;
    let invalid_credentials = || {
        (
            StatusCode::UNAUTHORIZED,
            "Invalid email or password".to_string(),
        )
    };

    // 1. Get user by email
    let credentials = state
        .db
        .get_user_credentials_by_email(&normalize_email(&req.email))
        .await
        .map_err(|e| match e {
            PortError::NotFound(_) => invalid_credentials(),
            other => reject(other, "Failed to sign in"),
        })?;

    // 2. Verify password
    let parsed_hash = PasswordHash::new(&credentials.password_hash).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Authentication error".to_string())
    })?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| invalid_credentials())?;

    // 3. Mint the bearer token
    let issued = state
        .tokens
        .issue(credentials.id)
        .map_err(|e| reject(e, "Failed to create token"))?;

    info!(user_id = credentials.id, "user signed in");
    Ok(Json(SigninResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_at: issued.expires_at,
    }))
}

/// GET /me - The caller's public profile
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "User no longer exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, HttpError> {
    let user = state
        .db
        .get_user_by_id(auth.user_id)
        .await
        .map_err(|e| reject(e, "Failed to load profile"))?;
    Ok(Json(user.into()))
}
