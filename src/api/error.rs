//! Error types for catalog API calls.
//!
//! Every failure is non-fatal: effects turn it into a failure intent whose
//! message is the server's, or a per-operation fallback.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to the catalog backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Could not build a request URL from the configured base.
    #[error("Invalid request URL '{url}': {reason}")]
    Url { url: String, reason: String },

    /// Connection refused, DNS failure, timeout, ...
    #[error("Request to '{endpoint}' failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-2xx status.
    #[error("Backend returned {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// Response body was not the expected JSON shape.
    #[error("Failed to decode response from '{endpoint}': {reason}")]
    Decode { endpoint: String, reason: String },
}

impl ApiError {
    /// Message supplied by the backend, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Message to surface to the user: the server's, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Build a `Status` error from a raw error body.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        ApiError::Status {
            status,
            message: extract_message(body),
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

/// Pull `message` out of a JSON error body.
///
/// Accepts `{"message": "..."}` and the validation-pipe shape
/// `{"message": ["a", "b"]}` (joined with ", ").
pub fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("message")? {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}
