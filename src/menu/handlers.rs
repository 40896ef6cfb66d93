//! REST API handlers for the menu
//!
//! Public browsing (`GET`) plus the administrative create/update/delete
//! endpoints used to maintain the catalog.

use super::{helpers::group_by_category, models::*};
use crate::{
    cart::models::MessageResponse,
    error::ServiceError,
    state::SharedState,
    store::MenuFilter,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

/// Creates routes for menu operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/menu", get(list_menu).post(create_menu_item))
        .route(
            "/api/menu/:id",
            get(get_menu_item).put(update_menu_item).delete(delete_menu_item),
        )
}

/// Endpoint: GET /api/menu
/// Active items grouped by section, optionally narrowed to one `?category=`.
async fn list_menu(
    State(state): State<SharedState>,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> Result<Json<GroupedMenu>, ServiceError> {
    let Query(query) = query?;
    let category = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(raw) => match raw.parse::<Category>() {
            Ok(category) => Some(category),
            // No item can be in an unknown section.
            Err(_) => return Ok(Json(GroupedMenu::default())),
        },
        None => None,
    };
    let items = state.catalog().list_menu_items(&MenuFilter::storefront(category)).await?;
    Ok(Json(group_by_category(items)))
}

/// Endpoint: GET /api/menu/:id
/// Resolves any item by id, active or not.
async fn get_menu_item(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MenuItem>, ServiceError> {
    let item = state
        .catalog()
        .find_menu_item(&id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Menu item not found"))?;
    Ok(Json(item))
}

/// Endpoint: POST /api/menu
async fn create_menu_item(
    State(state): State<SharedState>,
    payload: Result<Json<NewMenuItem>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuItem>), ServiceError> {
    let Json(input) = payload?;
    let item = input.into_menu_item();
    item.validate().map_err(ServiceError::InvalidArgument)?;
    state.catalog().save_menu_item(&item).await?;
    info!(id = %item.id, name = %item.name, "Created menu item");
    Ok((StatusCode::CREATED, Json(item)))
}

/// Endpoint: PUT /api/menu/:id
/// Applies the supplied fields and re-validates the result.
async fn update_menu_item(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<MenuItemUpdate>, JsonRejection>,
) -> Result<Json<MenuItem>, ServiceError> {
    let Json(update) = payload?;
    let mut item = state
        .catalog()
        .find_menu_item(&id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Menu item not found"))?;
    update.apply_to(&mut item);
    item.validate().map_err(ServiceError::InvalidArgument)?;
    state.catalog().save_menu_item(&item).await?;
    info!(id = %item.id, "Updated menu item");
    Ok(Json(item))
}

/// Endpoint: DELETE /api/menu/:id
async fn delete_menu_item(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServiceError> {
    state
        .catalog()
        .delete_menu_item(&id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Menu item not found"))?;
    info!(%id, "Deleted menu item");
    Ok(Json(MessageResponse { message: "Menu item deleted successfully".to_string() }))
}
