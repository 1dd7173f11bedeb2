use thiserror::Error;

/// Scheme prefix expected in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Error for bearer credential extraction.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Authorization header is not of the form `Bearer <token>`")]
    InvalidScheme,
}

/// Pull the bearer credential out of an `Authorization` header value.
///
/// The scheme match is exact and case sensitive, with exactly one space before
/// the token. The token itself is returned untouched; whether it is an access
/// token or a refresh token, and whether it is any good, is for the caller to
/// decide.
///
/// # Arguments
/// * `header` - Raw header value, `None` if the header was absent
///
/// # Errors
/// * `MissingToken` - Header absent, empty, or nothing after the scheme
/// * `InvalidScheme` - Any other scheme, or a malformed separator
pub fn extract_bearer(header: Option<&str>) -> Result<&str, BearerError> {
    let header = header.ok_or(BearerError::MissingToken)?;

    if header.is_empty() || header == BEARER_PREFIX.trim_end() {
        return Err(BearerError::MissingToken);
    }

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::InvalidScheme)?;

    if token.trim().is_empty() {
        return Err(BearerError::MissingToken);
    }
    if token.starts_with(char::is_whitespace) {
        return Err(BearerError::InvalidScheme);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_token() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_opaque_token_is_returned_untouched() {
        let opaque = "4f9c2a7be0d1";
        let header = format!("Bearer {}", opaque);

        assert_eq!(extract_bearer(Some(&header)), Ok(opaque));
    }

    #[test]
    fn test_absent_header() {
        assert_eq!(extract_bearer(None), Err(BearerError::MissingToken));
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(extract_bearer(Some("")), Err(BearerError::MissingToken));
    }

    #[test]
    fn test_scheme_without_token() {
        assert_eq!(extract_bearer(Some("Bearer")), Err(BearerError::MissingToken));
        assert_eq!(extract_bearer(Some("Bearer ")), Err(BearerError::MissingToken));
        assert_eq!(
            extract_bearer(Some("Bearer    ")),
            Err(BearerError::MissingToken)
        );
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        assert_eq!(
            extract_bearer(Some("bearer abc")),
            Err(BearerError::InvalidScheme)
        );
        assert_eq!(
            extract_bearer(Some("BEARER abc")),
            Err(BearerError::InvalidScheme)
        );
    }

    #[test]
    fn test_other_schemes_are_rejected() {
        assert_eq!(
            extract_bearer(Some("Basic dXNlcjpwYXNz")),
            Err(BearerError::InvalidScheme)
        );
        assert_eq!(extract_bearer(Some("abc")), Err(BearerError::InvalidScheme));
    }

    #[test]
    fn test_single_space_separator() {
        assert_eq!(
            extract_bearer(Some("Bearer  abc")),
            Err(BearerError::InvalidScheme)
        );
        assert_eq!(
            extract_bearer(Some("Bearer\tabc")),
            Err(BearerError::InvalidScheme)
        );
    }
}
