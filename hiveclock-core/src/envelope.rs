use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Record type tag for outbound clock messages.
pub const CLOCK_KIND: &str = "clock";

/// The one record shape this client produces: `{"type": <string>, "data": <string>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: String,
}

impl Envelope {
    /// Build a clock envelope for the given instant (RFC 3339, UTC).
    pub fn clock(at: DateTime<Utc>) -> Self {
        Self {
            kind: CLOCK_KIND.to_string(),
            data: at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Decode an inbound text frame as a generic structured record.
///
/// Inbound schema is not constrained beyond "a JSON object"; callers get the
/// raw key/value mapping.
pub fn decode_record(text: &str) -> Result<Map<String, Value>, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Object(record) => Ok(record),
        other => Err(DecodeError::NotARecord {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
