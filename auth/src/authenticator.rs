use chrono::Duration;
use uuid::Uuid;

use crate::jwt::AccessTokenCodec;
use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetime of every access token.
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Argon2id PHC string with the hasher's default parameters and no known
/// password. Verified against when the account does not exist.
const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$HY21LfyF/bMpkMidWC3RaA$h72bUapyOtVrpR6LWkTk1iBNDFIFIoiGJOaHM1UhBwQ";

/// Authentication coordinator combining password verification and access
/// token minting.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    codec: AccessTokenCodec,
    access_token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator issuing one-hour access tokens.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_access_token_ttl(jwt_secret, Duration::seconds(ACCESS_TOKEN_TTL_SECONDS))
    }

    /// Create an authenticator with a custom access token lifetime.
    pub fn with_access_token_ttl(jwt_secret: &[u8], access_token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            codec: AccessTokenCodec::new(jwt_secret),
            access_token_ttl,
        }
    }

    /// Verify credentials and mint an access token for `user_id`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Subject of the minted token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_access_token(user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Fail a login for an account that does not exist.
    ///
    /// Runs a full verify against a placeholder hash first, so the call costs
    /// the same as a wrong password for a real account.
    pub fn reject_unknown_user(&self, password: &str) -> AuthenticationError {
        if let Err(e) = self.password_hasher.verify(password, UNKNOWN_USER_HASH) {
            return AuthenticationError::PasswordError(e);
        }
        AuthenticationError::InvalidCredentials
    }

    /// Mint an access token without password verification.
    ///
    /// Used by the refresh flow, where the refresh token already proved the
    /// caller's identity.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, JwtError> {
        self.codec.mint(user_id, self.access_token_ttl)
    }

    /// Validate an access token and return its subject.
    ///
    /// # Errors
    /// * `JwtError` - Token is forged, expired, or malformed
    pub fn validate_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.codec.verify(token)
    }
}
