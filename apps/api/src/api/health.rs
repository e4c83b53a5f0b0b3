//! Liveness endpoint, mounted outside the `/api` prefix.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Creates a router with the /health endpoint.
pub fn router() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
