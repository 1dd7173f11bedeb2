use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::ports::UserRepository;
use crate::domain::errors::StoreError;
use crate::domain::session::models::RefreshToken;
use crate::domain::session::ports::RefreshTokenRepository;

/// In-process user store.
///
/// Used when no database is configured, and by tests. Each operation holds
/// the lock for its whole read-modify-write, matching the atomicity of the
/// PostgreSQL statements.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AccountError::EmailAlreadyExists(user.email.to_string()));
        }
        if users.contains_key(&user.id) {
            return Err(StoreError::Constraint(format!("duplicate user id {}", user.id)).into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(AccountError::NotFound(user.id.to_string()));
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AccountError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_all(&self) -> Result<u64, AccountError> {
        let mut users = self.users.write().await;
        let deleted = users.len() as u64;
        users.clear();
        Ok(deleted)
    }
}

/// In-process refresh token store keyed by token value.
///
/// Built with `with_users`, it honours the owner reference of the
/// `refresh_tokens.user_id` foreign key: inserting for an unknown user is a
/// constraint violation and tokens of deleted users are no longer visible.
/// Built with `new`, owners are not checked.
#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: RwLock<HashMap<String, RefreshToken>>,
    users: Option<Arc<InMemoryUserRepository>>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            tokens: RwLock::default(),
            users: Some(users),
        }
    }

    // Never called while a token lock is held.
    async fn owner_exists(&self, user_id: &UserId) -> bool {
        match &self.users {
            Some(users) => users.users.read().await.contains_key(user_id),
            None => true,
        }
    }

    async fn visible(&self, row: Option<RefreshToken>) -> Option<RefreshToken> {
        let row = row?;
        self.owner_exists(&row.user_id).await.then_some(row)
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, StoreError> {
        if !self.owner_exists(&token.user_id).await {
            return Err(StoreError::Constraint(format!(
                "refresh token owner {} does not exist",
                token.user_id
            )));
        }

        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token) {
            return Err(StoreError::Constraint(
                "refresh token value already exists".to_string(),
            ));
        }

        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn find(&self, token: &str) -> Result<Option<RefreshToken>, StoreError> {
        let row = self.tokens.read().await.get(token).cloned();
        Ok(self.visible(row).await)
    }

    async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, StoreError> {
        let row = self.tokens.write().await.get_mut(token).map(|row| {
            row.revoked_at.get_or_insert(revoked_at);
            row.clone()
        });
        Ok(self.visible(row).await)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut tokens = self.tokens.write().await;
        let deleted = tokens.len() as u64;
        tokens.clear();
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::account::models::EmailAddress;

    fn user(email: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_user_email_is_unique() {
        let repository = InMemoryUserRepository::new();

        repository.create(user("jesse@pinkman.com")).await.unwrap();
        let result = repository.create(user("jesse@pinkman.com")).await;

        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_to_taken_email() {
        let repository = InMemoryUserRepository::new();

        repository.create(user("jesse@pinkman.com")).await.unwrap();
        let mut other = repository.create(user("skinny@pete.com")).await.unwrap();
        other.email = EmailAddress::new("jesse@pinkman.com".to_string()).unwrap();

        assert!(matches!(
            repository.update(other).await,
            Err(AccountError::EmailAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repository = InMemoryUserRepository::new();

        assert!(matches!(
            repository.update(user("jesse@pinkman.com")).await,
            Err(AccountError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(user("jesse@pinkman.com")).await.unwrap();

        let found = repository
            .find_by_email("jesse@pinkman.com")
            .await
            .unwrap()
            .expect("User not found");

        assert_eq!(found.id, created.id);
        assert!(repository
            .find_by_email("badger@pete.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_revoke_missing_token() {
        let repository = InMemoryRefreshTokenRepository::new();

        assert_eq!(repository.revoke("missing", Utc::now()).await, Ok(None));
    }

    #[tokio::test]
    async fn test_revoke_keeps_first_timestamp() {
        let repository = InMemoryRefreshTokenRepository::new();
        let first = Utc::now();
        repository
            .insert(RefreshToken::new(
                "abc".to_string(),
                UserId::new(),
                first,
                Duration::days(60),
            ))
            .await
            .unwrap();

        repository.revoke("abc", first).await.unwrap();
        let row = repository
            .revoke("abc", first + Duration::minutes(5))
            .await
            .unwrap()
            .expect("Token not found");

        assert_eq!(row.revoked_at, Some(first));
    }

    #[tokio::test]
    async fn test_token_owner_must_exist() {
        let users = Arc::new(InMemoryUserRepository::new());
        let repository = InMemoryRefreshTokenRepository::with_users(Arc::clone(&users));

        let orphan = repository
            .insert(RefreshToken::new(
                "orphan".to_string(),
                UserId::new(),
                Utc::now(),
                Duration::days(60),
            ))
            .await;
        assert!(matches!(orphan, Err(StoreError::Constraint(_))));

        let owner = users.create(user("jesse@pinkman.com")).await.unwrap();
        let owned = repository
            .insert(RefreshToken::new(
                "owned".to_string(),
                owner.id,
                Utc::now(),
                Duration::days(60),
            ))
            .await;
        assert!(owned.is_ok());
    }

    #[tokio::test]
    async fn test_tokens_disappear_with_their_owner() {
        let users = Arc::new(InMemoryUserRepository::new());
        let repository = InMemoryRefreshTokenRepository::with_users(Arc::clone(&users));

        let owner = users.create(user("jesse@pinkman.com")).await.unwrap();
        repository
            .insert(RefreshToken::new(
                "abc".to_string(),
                owner.id,
                Utc::now(),
                Duration::days(60),
            ))
            .await
            .unwrap();

        users.delete_all().await.unwrap();

        assert_eq!(repository.find("abc").await, Ok(None));
        assert_eq!(repository.revoke("abc", Utc::now()).await, Ok(None));
    }
}
