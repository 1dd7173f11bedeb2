use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::account::models::User;
use crate::domain::account::models::UserId;

/// Lifetime of a refresh token from the moment it is issued.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Long-lived opaque credential tracked by the server.
///
/// Created at login and mutated only by revocation. Usable while
/// `revoked_at` is unset and `now < expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Build a fresh, unrevoked token issued at `now`.
    pub fn new(token: String, user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token,
            user_id,
            created_at: now,
            expires_at: now + ttl,
            revoked_at: None,
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Login request after decoding. The email is deliberately left unvalidated
/// so that a malformed address fails exactly like an unknown one.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}
