use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use super::errors::AccountError;
use super::models::RegisterUserCommand;
use super::models::UpdateCredentialsCommand;
use super::models::User;
use super::models::UserId;
use super::ports::AccountServicePort;
use super::ports::UserRepository;

/// Domain service implementation for account operations.
pub struct AccountService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> AccountService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Hash on the blocking pool so Argon2 does not stall the runtime.
    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        if password.is_empty() {
            return Err(AccountError::EmptyPassword);
        }

        let hasher = self.password_hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(AccountError::from)
    }
}

#[async_trait]
impl<UR> AccountServicePort for AccountService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AccountError> {
        let password_hash = self.hash_password(command.password).await?;
        let now = Utc::now();

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let user = self.repository.create(user).await?;
        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn update_credentials(
        &self,
        id: &UserId,
        command: UpdateCredentialsCommand,
    ) -> Result<User, AccountError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        user.password_hash = self.hash_password(command.password).await?;
        user.email = command.email;
        user.updated_at = Utc::now();

        let user = self.repository.update(user).await?;
        tracing::info!(user_id = %user.id, "User credentials updated");

        Ok(user)
    }
}
