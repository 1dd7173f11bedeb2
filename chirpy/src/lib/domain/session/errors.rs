use thiserror::Error;

use crate::domain::account::errors::AccountError;
use crate::domain::errors::StoreError;

/// Error for refresh token store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenStoreError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token expired")]
    Expired,

    #[error("Refresh token revoked")]
    Revoked,

    #[error("Refresh token generation failed: {0}")]
    Generation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error kinds surfaced by session flows.
///
/// Every cryptographic, parsing and storage failure is folded into one of
/// these before it reaches the HTTP boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Persistence failure: {0}")]
    Persistence(StoreError),

    #[error("Operation not allowed on this platform")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RefreshTokenStoreError> for SessionError {
    fn from(err: RefreshTokenStoreError) -> Self {
        match err {
            RefreshTokenStoreError::NotFound
            | RefreshTokenStoreError::Expired
            | RefreshTokenStoreError::Revoked => SessionError::Unauthorized,
            RefreshTokenStoreError::Store(e) => SessionError::Persistence(e),
            RefreshTokenStoreError::Generation(msg) => SessionError::Internal(msg),
        }
    }
}

impl From<AccountError> for SessionError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Store(e) => SessionError::Persistence(e),
            other => SessionError::Internal(other.to_string()),
        }
    }
}
