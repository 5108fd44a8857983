//! services/api/src/token.rs
//!
//! Mints and verifies the stateless bearer tokens handed out at signin.
//!
//! Tokens are HS256 JWTs carrying the user id and an expiry. Verification is a
//! pure signature and expiry check; it never touches the database.

use chrono::{DateTime, Duration, Utc};
use journal_core::ports::{PortError, PortResult};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The claim set embedded in every token. `sub` is the user id in decimal,
/// kept a string as JWT consumers expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly minted token and the moment it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl TokenService {
    pub fn new(secret: &str, validity: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            validity,
        }
    }

    /// Mints a token for `user_id` valid from now for the configured window.
    pub fn issue(&self, user_id: i64) -> PortResult<IssuedToken> {
        self.issue_at(user_id, Utc::now())
    }

    /// Mints a token as if it were issued at `issued_at`.
    pub fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> PortResult<IssuedToken> {
        let expires_at = issued_at.checked_add_signed(self.validity).ok_or_else(|| {
            PortError::Unexpected("token validity window overflows the clock".to_string())
        })?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| PortError::Unexpected(format!("failed to sign token: {}", e)))?;
        debug!(user_id, %expires_at, "issued bearer token");
        Ok(IssuedToken { token, expires_at })
    }

    /// Returns the user id embedded in `token`, or `Unauthorized` if the token is
    /// malformed, signed with another key, or expired.
    pub fn verify(&self, token: &str) -> PortResult<i64> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!("rejected bearer token: {}", e);
            PortError::Unauthorized
        })?;
        data.claims.sub.parse::<i64>().map_err(|_| {
            debug!("bearer token has a non-numeric subject");
            PortError::Unauthorized
        })
    }
}
