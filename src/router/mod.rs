//! Routing module for the storefront API

pub mod system;

use crate::{config::ServerConfig, state::SharedState};
use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        info!("REQ: {method} {uri}");
        let res = next.run(req).await;
        if !res.status().is_success() {
            warn!("RES: {} for {method} {uri}", res.status());
        }
        res
    });

    let cors_layer = cors_layer(&state.config);

    let mut router = Router::new()
        .merge(system::routes())
        .merge(crate::menu::routes())
        .merge(crate::cart::routes())
        .merge(crate::orders::routes());
    if !state.config.mode.is_production() {
        router = router.merge(system::test_routes());
    }

    router.layer(log_layer).layer(cors_layer).with_state(state)
}

/// CORS restricted to the configured storefront origins, with credentials.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("⚠️ Ignoring invalid CORS origin {origin}: {e}");
                None
            }
        })
        .collect();
    info!("🌍 Allowed CORS origins: {}", config.cors_origins.join(", "));

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}
