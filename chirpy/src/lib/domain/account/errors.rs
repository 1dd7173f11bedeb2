use thiserror::Error;

use crate::domain::errors::StoreError;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
