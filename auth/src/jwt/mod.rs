pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::AccessTokenClaims;
pub use claims::ISSUER;
pub use codec::AccessTokenCodec;
pub use errors::JwtError;
