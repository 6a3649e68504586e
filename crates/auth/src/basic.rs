// HTTP Basic Authentication header handling

use base64::prelude::*;

use crate::gate::{AuthError, Credentials};

/// Parse an `Authorization: Basic <base64(username:password)>` value.
///
/// Only the first `:` separates username from password, so passwords may
/// contain colons.
pub fn parse_basic_auth_header(auth_header: &str) -> Result<Credentials, AuthError> {
    let encoded = auth_header
        .strip_prefix("Basic ")
        .ok_or_else(|| AuthError::MalformedAuthorization("expected 'Basic ' scheme".to_string()))?;

    let decoded = BASE64_STANDARD
        .decode(encoded.trim().as_bytes())
        .map_err(|e| AuthError::MalformedAuthorization(format!("invalid base64: {e}")))?;

    let decoded = String::from_utf8(decoded)
        .map_err(|e| AuthError::MalformedAuthorization(format!("invalid UTF-8: {e}")))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| AuthError::MalformedAuthorization("expected 'username:password'".to_string()))?;

    Ok(Credentials::new(username, password))
}

/// Build the header value for `credentials`.
pub fn encode_basic_auth(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.username(), credentials.password());
    format!("Basic {}", BASE64_STANDARD.encode(raw))
}
