use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Issuer stamped into every access token.
pub const ISSUER: &str = "chirpy";

/// Claims carried by an access token.
///
/// Never persisted: the encoded token is the only copy. Claims are signed but
/// not encrypted, so nothing secret belongs here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenClaims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessTokenClaims {
    /// Create claims for `user_id`, issued at `issued_at` and valid for `ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry falls outside the representable time range
    pub fn new(
        user_id: Uuid,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("expiry out of range for ttl {}", ttl))
        })?;

        Ok(Self {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Parse the subject as a user identifier.
    ///
    /// # Errors
    /// * `MalformedClaims` - Subject is not a UUID
    pub fn subject(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| JwtError::MalformedClaims(format!("subject is not a user id: {}", e)))
    }
}
