use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::AccessTokenClaims;
use super::claims::ISSUER;
use super::errors::JwtError;

/// Mints and verifies signed access tokens.
///
/// Tokens are compact JWS strings (`header.payload.signature`, base64url)
/// signed with HS256 over the shared secret. Verification needs no server-side
/// state: the secret is the only root of trust, so rotating it invalidates
/// every outstanding token.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl AccessTokenCodec {
    /// Create a codec bound to a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret (should be at least 32 bytes)
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Mint an access token for `user_id`, valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry out of range or token encoding failed
    pub fn mint(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        let claims = AccessTokenClaims::new(user_id, Utc::now(), ttl)?;

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return the user it was issued to.
    ///
    /// The signature is checked before anything in the payload is trusted.
    /// Expiry is exact: no clock-skew leeway.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signed with a different secret or tampered with
    /// * `Expired` - Current time is past `exp`
    /// * `MalformedToken` - Not a decodable three-part token
    /// * `MalformedClaims` - Wrong issuer, missing claims, or non-UUID subject
    pub fn verify(&self, token: &str) -> Result<Uuid, JwtError> {
        self.decode_claims(token)?.subject()
    }

    /// Verify a token and return its full claim set.
    ///
    /// # Errors
    /// Same as [`AccessTokenCodec::verify`], except the subject is not parsed.
    pub fn decode_claims(&self, token: &str) -> Result<AccessTokenClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidIssuer | ErrorKind::MissingRequiredClaim(_) => {
                    JwtError::MalformedClaims(e.to_string())
                }
                _ => JwtError::MalformedToken(e.to_string()),
            })
    }
}
