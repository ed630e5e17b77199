//! The network seam.
//!
//! # Design
//! The dispatcher talks to the network through the `Transport` trait so unit
//! tests can substitute a canned implementation. `UreqTransport` is the
//! stock blocking implementation; it disables ureq's status-code-as-error
//! behavior so non-2xx responses come back as data and status interpretation
//! stays in the dispatcher. No retries and no timeout policy: a hung call
//! blocks only the caller that issued it.

use std::fmt;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// A transport-level failure: no response was received at all.
#[derive(Debug)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TransportError {}

/// Executes an `HttpRequest` against the network.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Stock blocking transport over ureq.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => {
                apply_headers(self.agent.get(&request.url), &request.headers).call()
            }
            (HttpMethod::Delete, None) => {
                apply_headers(self.agent.delete(&request.url), &request.headers).call()
            }
            (HttpMethod::Delete, Some(body)) => {
                // The unpark endpoint takes its ticket id as a DELETE body.
                apply_headers(self.agent.delete(&request.url), &request.headers)
                    .force_send_body()
                    .send(body.as_bytes())
            }
            (HttpMethod::Post, Some(body)) => {
                apply_headers(self.agent.post(&request.url), &request.headers)
                    .send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                apply_headers(self.agent.post(&request.url), &request.headers).send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                apply_headers(self.agent.put(&request.url), &request.headers)
                    .send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                apply_headers(self.agent.put(&request.url), &request.headers).send_empty()
            }
        };

        let mut response = result.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or("").to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            headers,
            body,
        })
    }
}

fn apply_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
