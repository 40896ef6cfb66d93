//! REST API handlers for orders

use super::models::*;
use crate::{error::ServiceError, state::SharedState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};

/// Creates routes for order operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/orders", get(list_orders).post(place_order))
        .route("/api/orders/:id", get(get_order))
        .route("/api/orders/:id/status", patch(update_status))
}

/// Endpoint: POST /api/orders
async fn place_order(
    State(state): State<SharedState>,
    payload: Result<Json<PlaceOrderInput>, JsonRejection>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), ServiceError> {
    let Json(input) = payload?;
    let order = state.orders.place_order(input.items, input.customer_info).await?;
    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse { success: true, order, message: "Order placed successfully".to_string() }),
    ))
}

/// Endpoint: GET /api/orders?status=&startDate=&endDate=
async fn list_orders(
    State(state): State<SharedState>,
    query: Result<Query<OrderQuery>, QueryRejection>,
) -> Result<Json<Vec<Order>>, ServiceError> {
    let Query(query) = query?;
    Ok(Json(state.orders.list_orders(&query).await?))
}

/// Endpoint: GET /api/orders/:id
async fn get_order(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ServiceError> {
    Ok(Json(state.orders.get_order(&id).await?))
}

/// Endpoint: PATCH /api/orders/:id/status
async fn update_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusInput>, JsonRejection>,
) -> Result<Json<Order>, ServiceError> {
    let status = payload.ok().and_then(|Json(input)| input.status);
    Ok(Json(state.orders.update_status(&id, status.as_deref()).await?))
}
