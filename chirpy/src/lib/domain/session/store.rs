use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;

use super::errors::RefreshTokenStoreError;
use super::models::RefreshToken;
use super::models::REFRESH_TOKEN_TTL_DAYS;
use super::ports::RefreshTokenRepository;
use crate::domain::account::models::UserId;

/// Issues, resolves and revokes opaque refresh tokens.
///
/// The repository is the single source of truth; this type adds token
/// generation and the validity rules on top of it.
pub struct RefreshTokenStore<TR>
where
    TR: RefreshTokenRepository,
{
    repository: Arc<TR>,
    ttl: Duration,
}

impl<TR> RefreshTokenStore<TR>
where
    TR: RefreshTokenRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self {
            repository,
            ttl: Duration::days(REFRESH_TOKEN_TTL_DAYS),
        }
    }

    /// Generate and persist a new token for `user_id`.
    ///
    /// A value collision surfaces as a constraint error and is not retried.
    ///
    /// # Errors
    /// * `Generation` - OS entropy source failed
    /// * `Store` - Persistence failed
    pub async fn issue(&self, user_id: UserId) -> Result<RefreshToken, RefreshTokenStoreError> {
        let value = auth::generate_refresh_token()
            .map_err(|e| RefreshTokenStoreError::Generation(e.to_string()))?;

        let token = self
            .repository
            .insert(RefreshToken::new(value, user_id, Utc::now(), self.ttl))
            .await?;

        tracing::debug!(user_id = %token.user_id, expires_at = %token.expires_at, "Refresh token issued");
        Ok(token)
    }

    /// Return the owner of a currently valid token.
    ///
    /// # Errors
    /// * `NotFound` - No such token
    /// * `Revoked` - Token was revoked (takes precedence over expiry)
    /// * `Expired` - Token lifetime elapsed
    /// * `Store` - Persistence failed
    pub async fn resolve(&self, token: &str) -> Result<UserId, RefreshTokenStoreError> {
        let row = self
            .repository
            .find(token)
            .await?
            .ok_or(RefreshTokenStoreError::NotFound)?;

        if row.is_revoked() {
            tracing::warn!(user_id = %row.user_id, "Attempt to use revoked refresh token");
            return Err(RefreshTokenStoreError::Revoked);
        }

        if row.is_expired(Utc::now()) {
            tracing::debug!(user_id = %row.user_id, "Refresh token expired");
            return Err(RefreshTokenStoreError::Expired);
        }

        Ok(row.user_id)
    }

    /// Revoke a token. Revoking an already revoked token is a no-op that keeps
    /// the original revocation time.
    ///
    /// # Errors
    /// * `NotFound` - No such token
    /// * `Store` - Persistence failed
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshTokenStoreError> {
        let row = self
            .repository
            .revoke(token, Utc::now())
            .await?
            .ok_or(RefreshTokenStoreError::NotFound)?;

        tracing::info!(user_id = %row.user_id, "Refresh token revoked");
        Ok(())
    }

    /// Delete every token.
    ///
    /// # Errors
    /// * `Store` - Persistence failed
    pub async fn purge_all(&self) -> Result<u64, RefreshTokenStoreError> {
        let deleted = self.repository.delete_all().await?;

        tracing::warn!(deleted, "All refresh tokens purged");
        Ok(deleted)
    }
}
