use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::errors::SessionError;
use super::models::LoginCommand;
use super::models::RefreshToken;
use super::models::Session;
use crate::domain::account::models::UserId;
use crate::domain::errors::StoreError;

/// Port for session lifecycle operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify a password and open a session.
    ///
    /// # Returns
    /// Session holding one new access token and one new refresh token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishably
    /// * `Persistence` - Account or token store failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Mint a new access token from a refresh token. The refresh token itself
    /// is left untouched.
    ///
    /// # Errors
    /// * `Unauthorized` - Refresh token unknown, expired or revoked
    /// * `Persistence` - Token store failed
    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token, ending the session it belongs to.
    ///
    /// # Errors
    /// * `Unauthorized` - Refresh token unknown
    /// * `Persistence` - Token store failed
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;

    /// Verify an access token and return its subject.
    ///
    /// # Errors
    /// * `Unauthorized` - Token forged, expired or malformed
    async fn authenticate(&self, access_token: &str) -> Result<UserId, SessionError>;

    /// Delete every refresh token and every account. Only allowed on the dev
    /// platform.
    ///
    /// # Errors
    /// * `Forbidden` - Not running on the dev platform
    /// * `Persistence` - A store failed
    async fn reset(&self) -> Result<(), SessionError>;
}

/// Persistence operations for refresh tokens, keyed by the token value.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a new token.
    ///
    /// # Errors
    /// * `Constraint` - Token value already exists
    /// * `Unavailable` / `Database` - Storage failure
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, StoreError>;

    /// Retrieve a token by value.
    ///
    /// # Errors
    /// * `Unavailable` / `Database` - Storage failure
    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, StoreError>;

    /// Set `revoked_at` unless already set, in a single atomic step.
    ///
    /// # Returns
    /// The row after the update, `None` if no such token exists
    ///
    /// # Errors
    /// * `Unavailable` / `Database` - Storage failure
    async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, StoreError>;

    /// Remove every token. Returns the number of rows deleted.
    ///
    /// # Errors
    /// * `Unavailable` / `Database` - Storage failure
    async fn delete_all(&self) -> Result<u64, StoreError>;
}
