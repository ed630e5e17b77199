//! Error types for the QuickPark API client.
//!
//! # Design
//! Network failures get a dedicated variant because callers present them
//! differently ("check your connection") from backend rejections. An HTTP
//! error displays the server's own body text verbatim when one exists,
//! falling back to a synthesized status line, so user-visible messages match
//! what the backend actually said.

use std::fmt;

/// Errors raised by the dispatcher and the catalog operations.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (DNS, connection refused, timeout) before any
    /// response was received.
    Network(String),

    /// The server responded with a non-2xx status.
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// Malformed base URL, or a path template whose placeholders do not
    /// match the supplied arguments.
    Config(String),
}

impl ApiError {
    /// True for failures classified as network errors.
    pub fn is_network_error(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Http {
                status,
                status_text,
                body,
            } => {
                if body.is_empty() {
                    write!(f, "HTTP {status}: {status_text}")
                } else {
                    write!(f, "{body}")
                }
            }
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
            ApiError::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Failure to decode a response body as JSON.
///
/// Returned only by the explicit decode operations. Catalog calls never
/// raise it; they fall back to the raw body text instead.
#[derive(Debug)]
pub struct DecodeError(pub String);

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decode failed: {}", self.0)
    }
}

impl std::error::Error for DecodeError {}
