use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use thiserror::Error;

/// Random bytes behind every refresh token (256 bits).
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Error for refresh token generation.
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenError {
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Generate an opaque refresh token.
///
/// 32 bytes from the operating system RNG, hex encoded. Consumers must treat
/// the value as opaque.
///
/// # Errors
/// * `EntropyUnavailable` - The OS random source failed
pub fn generate_refresh_token() -> Result<String, RefreshTokenError> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RefreshTokenError::EntropyUnavailable(e.to_string()))?;

    Ok(hex::encode(bytes))
}
