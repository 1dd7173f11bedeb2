use thiserror::Error;

/// Error type for access token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token claims are malformed: {0}")]
    MalformedClaims(String),
}
