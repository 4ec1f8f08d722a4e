//! JSON error responses in the shape every pilcrow service uses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Build a `{"error": ..., "code": ...}` JSON response.
pub fn json_error(status: StatusCode, code: &'static str, message: &str) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}
