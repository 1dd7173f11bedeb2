use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use super::errors::SessionError;
use super::models::LoginCommand;
use super::models::Session;
use super::ports::RefreshTokenRepository;
use super::ports::SessionServicePort;
use super::store::RefreshTokenStore;
use crate::domain::account::models::UserId;
use crate::domain::account::ports::UserRepository;
use crate::domain::platform::Platform;

/// Session orchestrator: login, refresh, revoke and access token checks.
///
/// Lifecycle per session: `LoggedOut -> Active` on login, `Active -> Active`
/// on refresh (same refresh token, new access token), `Active -> LoggedOut`
/// on revoke. Access token expiry needs no action here; the client refreshes.
pub struct SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    users: Arc<UR>,
    tokens: RefreshTokenStore<TR>,
    authenticator: Arc<Authenticator>,
    platform: Platform,
}

impl<UR, TR> SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - Account store used to look up credentials
    /// * `tokens` - Refresh token persistence
    /// * `authenticator` - Password verification and access token signing
    /// * `platform` - Deployment mode gating `reset`
    pub fn new(
        users: Arc<UR>,
        tokens: Arc<TR>,
        authenticator: Arc<Authenticator>,
        platform: Platform,
    ) -> Self {
        Self {
            users,
            tokens: RefreshTokenStore::new(tokens),
            authenticator,
            platform,
        }
    }
}

#[async_trait]
impl<UR, TR> SessionServicePort for SessionService<UR, TR>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        let Some(user) = self.users.find_by_email(&command.email).await? else {
            // Same Argon2 cost as a wrong password.
            let rejection = tokio::task::spawn_blocking(move || {
                authenticator.reject_unknown_user(&password)
            })
            .await
            .map_err(|e| SessionError::Internal(format!("Authentication task failed: {}", e)))?;
            tracing::debug!(reason = %rejection, "Login attempt for unknown email");
            return Err(SessionError::InvalidCredentials);
        };

        let password_hash = user.password_hash.clone();
        let user_id = user.id.as_uuid();

        // Argon2 is CPU bound; keep it off the async workers.
        let authenticated = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &password_hash, user_id)
        })
        .await
        .map_err(|e| SessionError::Internal(format!("Authentication task failed: {}", e)))?;

        let access_token = match authenticated {
            Ok(result) => result.access_token,
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                return Err(SessionError::InvalidCredentials);
            }
            Err(AuthenticationError::PasswordError(e)) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                return Err(SessionError::Internal(e.to_string()));
            }
            Err(AuthenticationError::JwtError(e)) => {
                return Err(SessionError::Internal(e.to_string()));
            }
        };

        let refresh_token = self.tokens.issue(user.id).await?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            access_token,
            refresh_token: refresh_token.token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let user_id = self.tokens.resolve(refresh_token).await?;

        self.authenticator
            .issue_access_token(user_id.as_uuid())
            .map_err(|e| SessionError::Internal(e.to_string()))
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        self.tokens.revoke(refresh_token).await?;
        Ok(())
    }

    async fn authenticate(&self, access_token: &str) -> Result<UserId, SessionError> {
        self.authenticator
            .validate_token(access_token)
            .map(UserId)
            .map_err(|e| {
                tracing::debug!(error = %e, "Access token rejected");
                SessionError::Unauthorized
            })
    }

    async fn reset(&self) -> Result<(), SessionError> {
        if !self.platform.allows_reset() {
            tracing::warn!(platform = %self.platform, "Reset refused");
            return Err(SessionError::Forbidden);
        }

        self.tokens.purge_all().await?;
        let users = self.users.delete_all().await?;
        tracing::warn!(users, "Environment reset");

        Ok(())
    }
}
