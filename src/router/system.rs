//! Service-level endpoints: API info, health, and the test-only cart reset.

use crate::state::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

pub const API_NAME: &str = "Smokey Restaurant API";

/// Routes mounted in every mode
pub fn routes() -> Router<SharedState> {
    Router::new().route("/", get(root)).route("/api/health", get(health))
}

/// Routes mounted everywhere except production
pub fn test_routes() -> Router<SharedState> {
    Router::new().route("/api/test/reset-carts", get(reset_carts))
}

/// Endpoint: GET /
async fn root(State(state): State<SharedState>) -> Json<Value> {
    let mut endpoints = json!({
        "menu": "GET /api/menu",
        "cart": "GET /api/cart/:sessionId",
        "order": "POST /api/orders",
        "health": "GET /api/health",
    });
    if !state.config.mode.is_production() {
        endpoints["testReset"] = json!("GET /api/test/reset-carts");
    }
    Json(json!({
        "message": API_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "mode": state.config.mode.as_str(),
        "endpoints": endpoints,
    }))
}

/// Endpoint: GET /api/health
/// Reports document counts, or 500 when the store cannot be reached.
async fn health(State(state): State<SharedState>) -> impl IntoResponse {
    let mode = state.config.mode.as_str();
    match state.counts().await {
        Ok(counts) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "mode": mode,
                "menuItems": counts.menu_items,
                "orders": counts.orders,
                "carts": counts.carts,
                "timestamp": Utc::now().to_rfc3339(),
            })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status": "error", "error": e.to_string(), "mode": mode })),
        ),
    }
}

/// Endpoint: GET /api/test/reset-carts
async fn reset_carts(State(state): State<SharedState>) -> Result<Json<Value>, crate::error::ServiceError> {
    let deleted = state.reset_carts().await?;
    info!(deleted, "Test carts cleared");
    Ok(Json(json!({
        "success": true,
        "message": "Test carts cleared",
        "deletedCount": deleted,
    })))
}
