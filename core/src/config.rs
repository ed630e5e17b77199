//! Client configuration.
//!
//! # Design
//! The base URL and default headers are fixed at construction and immutable
//! afterwards; the dispatcher receives the finished value. Validation
//! happens here so a malformed base URL fails before the first request
//! rather than inside it.

use url::Url;

use crate::error::ApiError;

/// Immutable configuration handed to the dispatcher at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Validate `base_url` and seed the default header set with
    /// `Content-Type: application/json`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers: vec![(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )],
        })
    }

    /// Add a default header applied to every request. Per-call headers with
    /// the same name still take precedence.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers
            .push((name.to_string(), value.to_string()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }
}
