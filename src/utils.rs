//! Utility functions for common operations.

use crate::error::ApiError;
use serde_json::Value;
use url::Url;

/// Joins the backend base URL with an absolute endpoint path.
///
/// A trailing slash on the base is ignored, so `http://host/` and `http://host`
/// resolve to the same endpoint. Path prefixes on the base are kept.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, ApiError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", joined, e)))
}

/// Extracts a human-readable message from an error response body.
///
/// Returns the `detail` field when it is a non-empty string. Structured details
/// (such as validation error lists) are rendered as their JSON text. Falsy
/// details (`null`, `false`, `0`, `""`), empty, non-JSON, or detail-less
/// bodies yield `None`.
pub fn extract_error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;

    match value.get("detail")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Masks a secret for display, keeping only its length visible.
pub fn mask_secret(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}
