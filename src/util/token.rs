//! Access-token expiry decoding.
//!
//! The backend issues JWTs. Only the payload's `exp` claim matters here; the
//! signature is the backend's concern and is never verified client-side.
//!
//! ERROR HANDLING
//! ==============
//! Decode failures are logged and downgraded to "not authenticated". They are
//! never shown to the user and never panic.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Reasons a token could not yield an expiry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// No payload segment after the first `.`.
    #[error("token is not a JWT")]
    Malformed,

    /// Payload segment is not base64.
    #[error("payload is not base64: {0}")]
    Encoding(String),

    /// Payload is not JSON with a numeric `exp`.
    #[error("payload has no usable exp claim: {0}")]
    Claims(String),
}

#[derive(Debug, Deserialize)]
struct Claims {
    exp: f64,
}

/// Extract the `exp` claim (seconds since epoch) from a JWT.
///
/// Only the second `.`-separated segment is read. It may use the base64url
/// or the standard alphabet, with or without `=` padding.
///
/// # Errors
///
/// Returns a [`TokenError`] when the payload segment is missing, not base64,
/// or carries no numeric `exp`.
pub fn decode_expiry(token: &str) -> Result<f64, TokenError> {
    let Some(payload) = token.split('.').nth(1) else {
        return Err(TokenError::Malformed);
    };

    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = URL_SAFE_NO_PAD.decode(normalized).map_err(|e| TokenError::Encoding(e.to_string()))?;
    let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| TokenError::Claims(e.to_string()))?;
    Ok(claims.exp)
}

/// True iff a token is present and its expiry is strictly after `now_secs`.
pub fn is_authenticated(token: Option<&str>, now_secs: f64) -> bool {
    let Some(token) = token else {
        return false;
    };
    match decode_expiry(token) {
        Ok(exp) => exp > now_secs,
        Err(e) => {
            leptos::logging::warn!("failed to decode access token: {e}");
            false
        }
    }
}
