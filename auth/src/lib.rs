//! Credential and session-token primitives.
//!
//! - Password hashing (Argon2id)
//! - Access token minting and verification (HS256 JWT)
//! - Bearer credential extraction from `Authorization` headers
//! - Opaque refresh token generation
//! - Authentication coordination
//!
//! Everything here is synchronous and free of I/O. Persistence of refresh
//! tokens belongs to the service that consumes this crate.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenCodec;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let codec = AccessTokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = codec.mint(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(codec.verify(&token).unwrap(), user_id);
//! ```
//!
//! ## Bearer Extraction
//! ```
//! use auth::{extract_bearer, BearerError};
//!
//! assert_eq!(extract_bearer(Some("Bearer abc")), Ok("abc"));
//! assert_eq!(extract_bearer(None), Err(BearerError::MissingToken));
//! ```

pub mod authenticator;
pub mod bearer;
pub mod jwt;
pub mod password;
pub mod refresh_token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::ACCESS_TOKEN_TTL_SECONDS;
pub use bearer::extract_bearer;
pub use bearer::BearerError;
pub use jwt::AccessTokenClaims;
pub use jwt::AccessTokenCodec;
pub use jwt::JwtError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh_token::generate_refresh_token;
pub use refresh_token::RefreshTokenError;
