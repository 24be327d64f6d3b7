//! Access-token expiry check.
//!
//! The token is a JWT; only the payload's `exp` claim matters here. The
//! signature is the backend's business.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Decode the payload segment and return `exp` (seconds since the epoch).
///
/// Returns `None` for anything that is not a three-part token with a JSON
/// payload carrying a numeric `exp`.
pub fn token_expiry(token: &str) -> Option<f64> {
    // Exactly header.payload.signature. Two-part or five-part (encrypted)
    // tokens are rejected even if a payload could be found.
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    // Tolerate padding and the standard alphabet.
    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    let bytes = URL_SAFE_NO_PAD.decode(normalized).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_f64()
}

/// True iff the token decodes and its expiry is after `now`.
pub fn is_token_live_at(token: &str, now: DateTime<Utc>) -> bool {
    match token_expiry(token) {
        Some(exp) => exp * 1000.0 > now.timestamp_millis() as f64,
        None => false,
    }
}

pub fn is_token_live(token: &str) -> bool {
    is_token_live_at(token, Utc::now())
}
