//! The result envelope consumed by UI callers.
//!
//! # Design
//! Envelopes are built only through the constructors, so a success envelope
//! can never carry an error message and a failure envelope can never carry
//! data. `From<&ApiError>` is the one conversion UI code needs to turn a
//! raised error into something renderable.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::decode::Payload;
use crate::error::{ApiError, DecodeError};

/// Uniform success/error wrapper returned to callers. Produced fresh per
/// call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_network_error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl Envelope {
    pub fn success(data: Payload) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            is_network_error: None,
            message: None,
        }
    }

    pub fn success_with_message(data: Payload, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::success(data)
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            is_network_error: None,
            message: None,
        }
    }

    pub fn network_failure(message: impl Into<String>) -> Self {
        Self {
            is_network_error: Some(true),
            ..Self::failure(message)
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn data(&self) -> Option<&Payload> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_network_error(&self) -> bool {
        self.is_network_error.unwrap_or(false)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Decode a JSON payload into a typed value.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        match &self.data {
            Some(Payload::Json(value)) => {
                serde_json::from_value(value.clone()).map_err(|e| DecodeError(e.to_string()))
            }
            Some(Payload::Text(_)) => Err(DecodeError(
                "payload is plain text, not JSON".to_string(),
            )),
            None => Err(DecodeError("envelope carries no data".to_string())),
        }
    }
}

impl From<&ApiError> for Envelope {
    fn from(err: &ApiError) -> Self {
        if err.is_network_error() {
            Envelope::network_failure(err.to_string())
        } else {
            Envelope::failure(err.to_string())
        }
    }
}
