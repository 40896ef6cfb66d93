use smokey_cart::config::ServerConfig;
use smokey_cart::router::create_app_router;
use smokey_cart::state::{AppState, Stores};
use smokey_cart::store::{seed::seed_catalog, MemoryStore, StoreHealth};
use std::process;
use std::sync::Arc;
use tracing::{error, info};

fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).compact().init();
}

#[tokio::main]
async fn main() {
    setup_tracing();
    info!("🚀 Starting server...");

    let config = ServerConfig::load();
    info!("📊 Mode: {}", config.mode.as_str());

    // The server must not accept traffic without a reachable store
    let store = Arc::new(MemoryStore::new());
    if let Err(e) = store.ping().await {
        error!("❌ Store connection failed. {e}");
        process::exit(1);
    }

    if config.seed_catalog {
        match seed_catalog(store.as_ref(), config.seed_file.as_deref()).await {
            Ok(0) => {}
            Ok(n) => info!("Inserted {n} menu items"),
            Err(e) => {
                error!("❌ Could not seed the catalog. {e}");
                process::exit(1);
            }
        }
    }

    let bind_addr = format!("{}:{}", config.host, config.port);
    let production = config.mode.is_production();
    let state = Arc::new(AppState::new(config, Stores::shared(store)));
    let app = create_app_router(state);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("❌ Could not bind {bind_addr}. {e}");
            process::exit(1);
        }
    };
    info!("🚀 Server running on http://{bind_addr}");
    info!("📚 Available endpoints:");
    info!("   GET  /              - API info");
    info!("   GET  /api/health    - Health check");
    info!("   GET  /api/menu      - Get menu items");
    info!("   GET  /api/cart/:id  - Get cart");
    info!("   POST /api/orders    - Place order");
    if !production {
        info!("   GET  /api/test/reset-carts - Clear test carts");
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!("❌ Server error. {e}");
        process::exit(1);
    }
}
