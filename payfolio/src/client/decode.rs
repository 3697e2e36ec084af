//! Turning a raw response into a typed result or an `ApiError`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::transport::RawResponse;

/// Decode a success body as `T`, or map a failure status to `ApiError::Request`.
///
/// An empty success body (e.g. `204 No Content`) decodes as JSON `null`,
/// which satisfies `()` and `Option<_>` targets.
pub fn decode_response<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Request {
            status: response.status,
            message: error_message(response.status, &response.body),
        });
    }

    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };

    serde_json::from_slice(body).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

/// Message for a failure response, falling back to `HTTP <status>`.
pub fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| message_from_body(&value))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

fn message_from_body(body: &Value) -> Option<String> {
    match body.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        // Validation failures: [{"loc": [...], "msg": "...", "type": "..."}]
        Some(Value::Array(entries)) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    body.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}
