//! Application State
//!
//! Everything a request handler needs, built once at startup and shared behind
//! an `Arc`. Store handles are injected here instead of living in globals.

use crate::{
    cart::CartEngine,
    config::ServerConfig,
    error::ServiceError,
    orders::OrderMaterializer,
    store::{CartFilter, CartStore, CatalogStore, MemoryStore, OrderStore, StoreHealth},
};
use serde::Serialize;
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// The collaborator handles the application runs against.
#[derive(Clone)]
pub struct Stores {
    pub catalog: Arc<dyn CatalogStore>,
    pub carts: Arc<dyn CartStore>,
    pub orders: Arc<dyn OrderStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl Stores {
    /// Uses one backend for every collection.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: CatalogStore + CartStore + OrderStore + StoreHealth + 'static,
    {
        Self { catalog: store.clone(), carts: store.clone(), orders: store.clone(), health: store }
    }
}

/// Document counts reported by the health endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCounts {
    pub menu_items: usize,
    pub orders: usize,
    pub carts: usize,
}

pub struct AppState {
    pub config: ServerConfig,
    pub stores: Stores,
    pub carts: CartEngine,
    pub orders: OrderMaterializer,
}

impl AppState {
    pub fn new(config: ServerConfig, stores: Stores) -> Self {
        let carts = CartEngine::new(stores.catalog.clone(), stores.carts.clone());
        let orders = OrderMaterializer::new(stores.catalog.clone(), stores.orders.clone());
        Self { config, stores, carts, orders }
    }

    /// State over a fresh, empty in-process store.
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(config, Stores::shared(Arc::new(MemoryStore::new())))
    }

    pub fn catalog(&self) -> &dyn CatalogStore {
        self.stores.catalog.as_ref()
    }

    pub async fn counts(&self) -> Result<StoreCounts, ServiceError> {
        Ok(StoreCounts {
            menu_items: self.stores.catalog.count_menu_items().await?,
            orders: self.stores.orders.count_orders().await?,
            carts: self.stores.carts.count_carts().await?,
        })
    }

    /// Deletes every cart. Used by the non-production reset endpoint.
    pub async fn reset_carts(&self) -> Result<usize, ServiceError> {
        Ok(self.stores.carts.delete_carts(&CartFilter::default()).await?)
    }
}
