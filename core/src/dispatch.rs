//! Request dispatch: URL building, header merging, outcome classification.
//!
//! # Design
//! `dispatch` owns exactly three jobs: build the full URL, merge headers,
//! and classify the outcome as success, HTTP error, or network error. It
//! never decodes the body of a successful response; each body is read once,
//! by the transport, and interpreted once, by whoever consumes it.

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Per-call overrides applied on top of the client configuration.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl DispatchOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Issues requests and classifies their outcomes.
#[derive(Debug)]
pub struct Dispatcher<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request. A 2xx response comes back unconsumed; a non-2xx
    /// status becomes `ApiError::Http` carrying the body text, a transport
    /// failure becomes `ApiError::Network`.
    pub fn dispatch(&self, path: &str, options: DispatchOptions) -> Result<HttpResponse, ApiError> {
        let url = join_url(self.config.base_url(), path);
        let headers = merge_headers(self.config.default_headers(), &options.headers);
        let request = HttpRequest {
            method: options.method,
            url,
            headers,
            body: options.body,
        };

        debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self
            .transport
            .send(&request)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!(status = response.status, url = %request.url, "received response");

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Http {
                status: response.status,
                status_text: response.status_text,
                body: response.body,
            })
        }
    }
}

/// Join a base URL and a path with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Defaults first, then per-call headers; a per-call header replaces any
/// default with the same name, compared case-insensitively.
fn merge_headers(
    defaults: &[(String, String)],
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults
        .iter()
        .filter(|(name, _)| !overrides.iter().any(|(o, _)| o.eq_ignore_ascii_case(name)))
        .cloned()
        .collect();
    merged.extend(overrides.iter().cloned());
    merged
}
