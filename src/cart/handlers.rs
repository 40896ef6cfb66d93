//! REST API handlers for shopping cart operations
//!
//! This module implements the session cart endpoints. `:itemId` in the item
//! routes is always the line-local id (`items[].id`), never a menu item id.

use super::{helpers::debug_view, models::*};
use crate::{error::ServiceError, state::SharedState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post, put},
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/cart/:session_id", get(get_cart).delete(clear_cart))
        .route("/api/cart/:session_id/items", post(add_item))
        .route("/api/cart/:session_id/items/:item_id", put(update_item).delete(remove_item))
        .route("/api/cart/:session_id/debug", get(debug_cart))
}

/// Endpoint: GET /api/cart/:sessionId
/// Returns the session's cart, creating an empty one on first access.
async fn get_cart(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<Cart>, ServiceError> {
    Ok(Json(state.carts.get_or_create(&session_id).await?))
}

/// Endpoint: POST /api/cart/:sessionId/items
async fn add_item(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
    payload: Result<Json<AddItemInput>, JsonRejection>,
) -> Result<Json<Cart>, ServiceError> {
    let Json(input) = payload?;
    Ok(Json(state.carts.add_item(&session_id, &input.menu_item_id, input.quantity).await?))
}

/// Endpoint: PUT /api/cart/:sessionId/items/:itemId
async fn update_item(
    State(state): State<SharedState>,
    Path((session_id, item_id)): Path<(String, String)>,
    payload: Result<Json<UpdateQuantityInput>, JsonRejection>,
) -> Result<Json<Cart>, ServiceError> {
    // A missing or unreadable body means the quantity is missing.
    let quantity = payload.ok().and_then(|Json(input)| input.quantity);
    Ok(Json(state.carts.update_quantity(&session_id, &item_id, quantity).await?))
}

/// Endpoint: DELETE /api/cart/:sessionId/items/:itemId
async fn remove_item(
    State(state): State<SharedState>,
    Path((session_id, item_id)): Path<(String, String)>,
) -> Result<Json<Cart>, ServiceError> {
    Ok(Json(state.carts.remove_item(&session_id, &item_id).await?))
}

/// Endpoint: DELETE /api/cart/:sessionId
async fn clear_cart(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<MessageResponse>, ServiceError> {
    state.carts.clear(&session_id).await?;
    Ok(Json(MessageResponse { message: "Cart cleared successfully".to_string() }))
}

/// Endpoint: GET /api/cart/:sessionId/debug
/// Flattened view of the stored cart for troubleshooting client integrations.
async fn debug_cart(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<CartDebugView>, ServiceError> {
    let cart = state.carts.find(&session_id).await?;
    Ok(Json(debug_view(&cart)))
}
