//! Structured errors for the pagetalk server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pagetalk_client::CompletionError;

/// Errors a request handler can surface.
///
/// All variants map to an opaque 500 for the caller; the detail goes to
/// the logs only.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The completions call failed.
    #[error("completion failed: {0}")]
    Completion(#[from] CompletionError),

    /// A required collaborator was not configured.
    #[error("service misconfigured: {0}")]
    Misconfigured(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "chat request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "Internal Server Error" }))).into_response()
    }
}
