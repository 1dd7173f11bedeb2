use async_trait::async_trait;

use super::errors::AccountError;
use super::models::RegisterUserCommand;
use super::models::UpdateCredentialsCommand;
use super::models::User;
use super::models::UserId;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Store` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AccountError>;

    /// Replace the email and password of the authenticated user.
    ///
    /// # Arguments
    /// * `id` - Subject taken from a verified access token
    /// * `command` - New credentials
    ///
    /// # Errors
    /// * `NotFound` - User no longer exists
    /// * `EmailAlreadyExists` - New email belongs to another account
    /// * `Store` - Database operation failed
    async fn update_credentials(
        &self,
        id: &UserId,
        command: UpdateCredentialsCommand,
    ) -> Result<User, AccountError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Store` - Database operation failed
    async fn create(&self, user: User) -> Result<User, AccountError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `Store` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `Store` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;

    /// Update an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `Store` - Database operation failed
    async fn update(&self, user: User) -> Result<User, AccountError>;

    /// Remove every user. Returns the number of rows deleted.
    ///
    /// # Errors
    /// * `Store` - Database operation failed
    async fn delete_all(&self) -> Result<u64, AccountError>;
}
