//! Decoding of the backend's `{success, message, ...payload}` response shape.

use serde::de::DeserializeOwned;
use serde_json::Value;
use vayuhu_core::{GatewayError, GatewayResult};

/// Whether a response body reports success.
///
/// Booking endpoints send `success: true`; the auth endpoints send `status: "success"`.
pub fn is_success(body: &Value) -> bool {
    match body.get("success") {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => s == "true" || s == "1",
        _ => body.get("status").and_then(Value::as_str) == Some("success"),
    }
}

pub fn message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Turn a 2xx body into its payload, or `Rejected` when the backend says it failed.
pub fn decode<T: DeserializeOwned>(body: Value) -> GatewayResult<T> {
    if !is_success(&body) {
        return Err(GatewayError::Rejected {
            message: message(&body),
        });
    }
    serde_json::from_value(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Error for a non-2xx response, keeping the backend's message when the body has one.
pub fn status_error(status: u16, text: &str) -> GatewayError {
    let message = serde_json::from_str::<Value>(text)
        .ok()
        .as_ref()
        .and_then(message);
    GatewayError::Status { status, message }
}
