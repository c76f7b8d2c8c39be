use reqwest::StatusCode;
use serde::de::{self, DeserializeOwned};
use serde::Deserialize;

// ============================================================================
// Success envelope
// ============================================================================

/// `{success, message, data}` wrapper some backend responses use
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

/// Decode `body` as `T`, unwrapping the envelope when a `data` field is present.
///
/// All envelope handling for the auth endpoints goes through here; callers
/// only ever see the bare payload. Bodies that are not JSON objects are
/// rejected before decoding.
pub fn unwrap_envelope<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, serde_json::Error> {
    let Some(map) = body.as_object() else {
        return Err(de::Error::custom(format!(
            "expected a JSON object, got {}",
            json_kind(&body)
        )));
    };

    if map.contains_key("data") {
        let envelope: Envelope<T> = serde_json::from_value(body)?;
        Ok(envelope.data)
    } else {
        serde_json::from_value(body)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

// ============================================================================
// Failure bodies
// ============================================================================

#[derive(Debug, Deserialize)]
struct FailBody {
    #[serde(default)]
    data: Option<FailData>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FailData {
    #[serde(default)]
    message: Option<String>,
}

/// Human-readable message for a non-2xx response.
///
/// Uses the body's top-level `message`, then `data.message`, and falls back
/// to the status line when neither is present.
pub fn failure_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<FailBody>(body)
        .ok()
        .and_then(|fail| {
            fail.message
                .or_else(|| fail.data.and_then(|d| d.message))
        })
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {status}"))
}
