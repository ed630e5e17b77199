//! Response body decoding.
//!
//! # Design
//! Decoding is split into two explicit operations instead of one call that
//! returns either parsed JSON or raw text depending on what happened:
//! `decode_json` reports failure as an ordinary error value, `decode_text`
//! is the identity. `Payload` keeps the json-or-text fallback rule the
//! endpoint catalog needs, but as a tagged type callers can match on.

use serde::Serialize;

use crate::error::DecodeError;

/// Decode `text` as JSON. Failure is an error value, never a panic.
pub fn decode_json(text: &str) -> Result<serde_json::Value, DecodeError> {
    serde_json::from_str(text).map_err(|e| DecodeError(e.to_string()))
}

/// Decode `text` as plain text. Identity today; the call site records that
/// text was the mode it asked for.
pub fn decode_text(text: &str) -> String {
    text.to_string()
}

/// A decoded response body: structured JSON, or the raw text when the body
/// was not JSON or the endpoint is known to return text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}

impl Payload {
    /// The fallback rule: JSON when the body parses, the raw text otherwise.
    /// Never fails.
    pub fn from_json_or_text(raw: &str) -> Self {
        match decode_json(raw) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(raw.to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Json(_) => None,
            Payload::Text(text) => Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_json_parses_object() {
        let value = decode_json(r#"{"ticketId":"T1"}"#).unwrap();
        assert_eq!(value["ticketId"], "T1");
    }

    #[test]
    fn decode_json_reports_garbage_as_error() {
        assert!(decode_json("not json").is_err());
        assert!(decode_json("").is_err());
    }

    #[test]
    fn fallback_prefers_json() {
        let payload = Payload::from_json_or_text(r#"[1,2,3]"#);
        assert_eq!(payload.as_json().unwrap()[2], 3);
    }

    #[test]
    fn fallback_keeps_raw_text() {
        let payload = Payload::from_json_or_text("Gate updated successfully");
        assert_eq!(payload.as_text(), Some("Gate updated successfully"));
    }

    #[test]
    fn json_roundtrip_is_lossless() {
        let original = serde_json::json!({
            "vehicleNo": "AB12",
            "slots": [1, 2, 3],
            "nested": {"ok": true}
        });
        let encoded = serde_json::to_string(&original).unwrap();
        assert_eq!(decode_json(&encoded).unwrap(), original);
    }

    #[test]
    fn payload_serializes_untagged() {
        let json = serde_json::to_value(Payload::Text("plain".to_string())).unwrap();
        assert_eq!(json, serde_json::Value::String("plain".to_string()));
    }
}
