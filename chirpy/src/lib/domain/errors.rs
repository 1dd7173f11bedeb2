use thiserror::Error;

/// Error for persistence operations shared by every repository.
///
/// Split by whether retrying the same call can succeed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Network failure, pool exhaustion or timeout. Retryable.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Unique or foreign key violation. Fatal.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Any other database failure. Fatal.
    #[error("Database error: {0}")]
    Database(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unavailable_is_retryable() {
        assert!(StoreError::Unavailable("timeout".to_string()).is_retryable());
        assert!(!StoreError::Constraint("refresh_tokens_pkey".to_string()).is_retryable());
        assert!(!StoreError::Database("syntax error".to_string()).is_retryable());
    }
}
