//! HTTP route wiring.

pub mod chat;

use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::ratelimit::rate_limit_middleware;
use crate::state::AppState;

/// Build the application router.
///
/// The chat route sits behind the rate-limit gate; health does not, so
/// probes keep working while a client is throttled.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat::chat_handler))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit_middleware))
        .route("/health", get(health_handler))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
