pub mod memory;
pub mod refresh_token;
pub mod user;

pub use memory::InMemoryRefreshTokenRepository;
pub use memory::InMemoryUserRepository;
pub use refresh_token::PostgresRefreshTokenRepository;
pub use user::PostgresUserRepository;

use crate::domain::errors::StoreError;

/// Classify a sqlx error as retryable or fatal.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(err.to_string()),
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() =>
        {
            StoreError::Constraint(err.to_string())
        }
        _ => StoreError::Database(err.to_string()),
    }
}
