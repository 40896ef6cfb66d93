//! Integration tests for the storefront HTTP API
//!
//! These tests drive the full router against an in-memory store:
//! - Menu browsing and administration
//! - Session carts with derived totals
//! - Order placement, lookup and status tracking
//! - Health, API info and the test-only reset endpoint

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use smokey_cart::config::{RunMode, ServerConfig};
use smokey_cart::router::create_app_router;
use smokey_cart::state::AppState;

/// Helper function to create a test app instance
fn create_test_app() -> axum::Router {
    create_app_for(RunMode::Development)
}

fn create_app_for(mode: RunMode) -> axum::Router {
    let state = Arc::new(AppState::in_memory(ServerConfig::for_mode(mode)));
    create_app_router(state)
}

/// Helper function to send a request and get the status and JSON body back
async fn send_request(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, body)
}

/// Creates a menu item through the admin endpoint and returns its id
async fn create_item(app: &axum::Router, name: &str, price: f64, category: &str, active: bool) -> String {
    let (status, body) = send_request(
        app,
        "POST",
        "/api/menu",
        Some(json!({
            "name": name,
            "description": format!("{name} from the smoker"),
            "serving": "1 portion",
            "price": price,
            "category": category,
            "active": active,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

// ============================================================================
// Menu
// ============================================================================

#[tokio::test]
async fn test_menu_groups_active_items_by_category() {
    let app = create_test_app();
    create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;
    create_item(&app, "Mac & Cheese", 5.5, "sides", true).await;
    create_item(&app, "Retired Ribs", 20.0, "smokedMeats", false).await;

    let (status, body) = send_request(&app, "GET", "/api/menu", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["smokedMeats"].as_array().unwrap().len(), 1);
    assert_eq!(body["smokedMeats"][0]["name"], "Brisket");
    assert_eq!(body["sides"].as_array().unwrap().len(), 1);
    assert_eq!(body["sandwiches"], json!([]));
}

#[tokio::test]
async fn test_menu_category_filter() {
    let app = create_test_app();
    create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;
    create_item(&app, "Coleslaw", 3.0, "sides", true).await;

    let (status, body) = send_request(&app, "GET", "/api/menu?category=sides", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["smokedMeats"], json!([]));
    assert_eq!(body["sides"][0]["name"], "Coleslaw");

    let (status, body) = send_request(&app, "GET", "/api/menu?category=desserts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "smokedMeats": [], "sides": [], "sandwiches": [] }));
}

#[tokio::test]
async fn test_menu_item_lookup_and_admin() {
    let app = create_test_app();
    let id = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;

    let (status, body) = send_request(&app, "GET", &format!("/api/menu/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], json!(10.0));

    let (status, body) =
        send_request(&app, "PUT", &format!("/api/menu/{id}"), Some(json!({ "price": 12.5 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], json!(12.5));
    assert_eq!(body["name"], "Brisket");

    let (status, _) = send_request(&app, "PUT", &format!("/api/menu/{id}"), Some(json!({ "price": -1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_request(&app, "DELETE", &format!("/api/menu/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Menu item deleted successfully");

    let (status, body) = send_request(&app, "GET", &format!("/api/menu/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Menu item not found");
}

#[tokio::test]
async fn test_create_menu_item_rejects_bad_payload() {
    let app = create_test_app();
    let (status, body) = send_request(&app, "POST", "/api/menu", Some(json!({ "name": "Pie" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_get_cart_creates_empty_cart() {
    let app = create_test_app();
    let (status, body) = send_request(&app, "GET", "/api/cart/s1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sessionId"], "s1");
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["subtotal"], json!(0.0));
    assert_eq!(body["tax"], json!(0.0));
    assert_eq!(body["total"], json!(0.0));
}

#[tokio::test]
async fn test_add_items_merges_and_recomputes_totals() {
    let app = create_test_app();
    let brisket = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/cart/s1/items",
        Some(json!({ "menuItemId": brisket, "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["subtotal"], json!(20.0));
    assert_eq!(body["tax"], json!(0.4));
    assert_eq!(body["total"], json!(20.4));

    // Quantity defaults to 1
    let (status, body) =
        send_request(&app, "POST", "/api/cart/s1/items", Some(json!({ "menuItemId": brisket }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 3);
    assert_eq!(body["subtotal"], json!(30.0));
    assert_eq!(body["tax"], json!(0.6));
    assert_eq!(body["total"], json!(30.6));
}

#[tokio::test]
async fn test_add_item_errors() {
    let app = create_test_app();
    let brisket = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;

    let (status, body) =
        send_request(&app, "POST", "/api/cart/s1/items", Some(json!({ "menuItemId": "missing" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Menu item not found");

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/cart/s1/items",
        Some(json!({ "menuItemId": brisket, "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Quantity must be at least 1");

    let (status, _) = send_request(&app, "POST", "/api/cart/s1/items", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_remove_line_items() {
    let app = create_test_app();
    let brisket = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;
    let (_, cart) = send_request(
        &app,
        "POST",
        "/api/cart/s1/items",
        Some(json!({ "menuItemId": brisket, "quantity": 2 })),
    )
    .await;
    let line_id = cart["items"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = send_request(
        &app,
        "PUT",
        &format!("/api/cart/s1/items/{line_id}"),
        Some(json!({ "quantity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["quantity"], 5);
    assert_eq!(body["total"], json!(51.0));

    let (status, body) =
        send_request(&app, "PUT", &format!("/api/cart/s1/items/{line_id}"), Some(json!({ "quantity": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Quantity must be at least 1");

    let (status, _) = send_request(&app, "PUT", &format!("/api/cart/s1/items/{line_id}"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_request(&app, "DELETE", "/api/cart/s1/items/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found in cart");
    assert_eq!(body["details"], "Item with id nope not found");

    let (status, body) = send_request(&app, "DELETE", &format!("/api/cart/s1/items/{line_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], json!(0.0));
}

#[tokio::test]
async fn test_update_on_missing_cart() {
    let app = create_test_app();
    let (status, body) =
        send_request(&app, "PUT", "/api/cart/ghost/items/any", Some(json!({ "quantity": 2 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Cart not found");
}

#[tokio::test]
async fn test_clear_cart() {
    let app = create_test_app();
    let brisket = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;
    send_request(&app, "POST", "/api/cart/s1/items", Some(json!({ "menuItemId": brisket }))).await;

    let (status, body) = send_request(&app, "DELETE", "/api/cart/s1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart cleared successfully");

    let (_, cart) = send_request(&app, "GET", "/api/cart/s1", None).await;
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total"], json!(0.0));

    let (status, body) = send_request(&app, "DELETE", "/api/cart/never-seen", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Cart not found");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = create_test_app();
    let brisket = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;
    send_request(&app, "POST", "/api/cart/a/items", Some(json!({ "menuItemId": brisket }))).await;

    let (_, other) = send_request(&app, "GET", "/api/cart/b", None).await;
    assert_eq!(other["items"], json!([]));
}

#[tokio::test]
async fn test_cart_debug_view() {
    let app = create_test_app();
    let brisket = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;

    let (status, _) = send_request(&app, "GET", "/api/cart/s1/debug", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send_request(&app, "POST", "/api/cart/s1/items", Some(json!({ "menuItemId": brisket, "quantity": 2 }))).await;
    let (status, body) = send_request(&app, "GET", "/api/cart/s1/debug", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itemCount"], 1);
    assert_eq!(body["items"][0]["menuItemId"], brisket.as_str());
    assert_eq!(body["summary"], "2x Brisket");
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_place_and_fetch_order() {
    let app = create_test_app();
    let brisket = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "items": [{ "menuItemId": brisket, "quantity": 2 }],
            "customerInfo": { "name": "Dana", "phone": "555-0100" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Order placed successfully");
    let order = &body["order"];
    assert_eq!(order["status"], "pending");
    assert_eq!(order["total"], json!(20.4));
    assert_eq!(order["customerInfo"]["name"], "Dana");
    assert!(order["orderNumber"].as_str().unwrap().starts_with("ORD-"));

    let id = order["id"].as_str().unwrap();
    let (status, fetched) = send_request(&app, "GET", &format!("/api/orders/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["orderNumber"], order["orderNumber"]);

    let (status, body) = send_request(&app, "GET", "/api/orders/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");
}

#[tokio::test]
async fn test_place_order_validation_is_all_or_nothing() {
    let app = create_test_app();
    let brisket = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;

    let (status, body) = send_request(&app, "POST", "/api/orders", Some(json!({ "items": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No items in order");

    let (status, body) = send_request(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "items": [{ "menuItemId": brisket }, { "menuItemId": "ghost" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"], "ghost");

    let (_, orders) = send_request(&app, "GET", "/api/orders", None).await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_list_orders_newest_first_with_status_filter() {
    let app = create_test_app();
    let brisket = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;
    let order = json!({ "items": [{ "menuItemId": brisket }] });

    let (_, first) = send_request(&app, "POST", "/api/orders", Some(order.clone())).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (_, second) = send_request(&app, "POST", "/api/orders", Some(order)).await;

    let (status, list) = send_request(&app, "GET", "/api/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], second["order"]["id"]);
    assert_eq!(list[1]["id"], first["order"]["id"]);

    let first_id = first["order"]["id"].as_str().unwrap();
    let (status, updated) =
        send_request(&app, "PATCH", &format!("/api/orders/{first_id}/status"), Some(json!({ "status": "confirmed" })))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "confirmed");

    let (_, confirmed) = send_request(&app, "GET", "/api/orders?status=confirmed", None).await;
    assert_eq!(confirmed.as_array().unwrap().len(), 1);
    assert_eq!(confirmed[0]["id"], first_id);

    let (_, none) = send_request(&app, "GET", "/api/orders?status=lost", None).await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn test_update_status_errors() {
    let app = create_test_app();
    let brisket = create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;
    let (_, placed) =
        send_request(&app, "POST", "/api/orders", Some(json!({ "items": [{ "menuItemId": brisket }] }))).await;
    let id = placed["order"]["id"].as_str().unwrap();

    let (status, body) =
        send_request(&app, "PATCH", &format!("/api/orders/{id}/status"), Some(json!({ "status": "shipped" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid status");

    let (status, _) = send_request(&app, "PATCH", &format!("/api/orders/{id}/status"), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
        send_request(&app, "PATCH", "/api/orders/ghost/status", Some(json!({ "status": "ready" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");
}

// ============================================================================
// System endpoints
// ============================================================================

#[tokio::test]
async fn test_health_reports_counts() {
    let app = create_test_app();
    create_item(&app, "Brisket", 10.0, "smokedMeats", true).await;
    send_request(&app, "GET", "/api/cart/s1", None).await;

    let (status, body) = send_request(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mode"], "development");
    assert_eq!(body["menuItems"], 1);
    assert_eq!(body["carts"], 1);
    assert_eq!(body["orders"], 0);
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let app = create_test_app();
    let (status, body) = send_request(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Smokey Restaurant API");
    assert_eq!(body["endpoints"]["testReset"], "GET /api/test/reset-carts");
}

#[tokio::test]
async fn test_reset_carts_outside_production() {
    let app = create_test_app();
    send_request(&app, "GET", "/api/cart/a", None).await;
    send_request(&app, "GET", "/api/cart/b", None).await;

    let (status, body) = send_request(&app, "GET", "/api/test/reset-carts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deletedCount"], 2);
}

#[tokio::test]
async fn test_production_hides_reset_endpoint() {
    let app = create_app_for(RunMode::Production);

    let (status, _) = send_request(&app, "GET", "/api/test/reset-carts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send_request(&app, "GET", "/", None).await;
    assert!(body["endpoints"].get("testReset").is_none());
}
