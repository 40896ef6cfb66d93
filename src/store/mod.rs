//! Persistence Collaborators
//!
//! The cart engine and order materializer never talk to a database directly.
//! They are handed trait objects for the three document collections they use
//! (menu items, carts, orders), which keeps them testable against fakes.
//!
//! - [`CatalogStore`]: read-mostly menu items, lookup by id and filtered listing
//! - [`CartStore`]: one cart document per session id, whole-document upserts
//! - [`OrderStore`]: immutable order documents plus status overwrites
//! - [`memory::MemoryStore`]: the in-process document store used by the server

pub mod memory;
pub mod seed;

use crate::{
    cart::models::Cart,
    menu::models::{Category, MenuItem},
    orders::models::{Order, OrderStatus},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use memory::MemoryStore;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Filters
// =============================================================================

/// Equality filter over menu items.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    pub category: Option<Category>,
    /// Restricts the result to items with `active == true`.
    pub active_only: bool,
}

impl MenuFilter {
    /// The filter used for the public menu listing.
    pub fn storefront(category: Option<Category>) -> Self {
        Self { category, active_only: true }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        (!self.active_only || item.active) && self.category.map_or(true, |c| item.category == c)
    }
}

/// Selects carts for bulk deletion. An empty filter selects every cart.
#[derive(Debug, Clone, Default)]
pub struct CartFilter {
    pub session_id: Option<String>,
}

impl CartFilter {
    pub fn matches(&self, cart: &Cart) -> bool {
        self.session_id.as_deref().map_or(true, |id| cart.session_id == id)
    }
}

/// Status and inclusive creation-time range filter over orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.status.map_or(true, |s| order.status == s)
            && self.created_from.map_or(true, |from| order.created_at >= from)
            && self.created_to.map_or(true, |to| order.created_at <= to)
    }
}

// =============================================================================
// Collaborator Traits
// =============================================================================

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_menu_item(&self, id: &str) -> Result<Option<MenuItem>, StoreError>;

    /// Returns matching items sorted by category, then name.
    async fn list_menu_items(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>, StoreError>;

    /// Inserts or replaces the item with the same id.
    async fn save_menu_item(&self, item: &MenuItem) -> Result<(), StoreError>;

    async fn delete_menu_item(&self, id: &str) -> Result<Option<MenuItem>, StoreError>;

    async fn count_menu_items(&self) -> Result<usize, StoreError>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_cart(&self, session_id: &str) -> Result<Option<Cart>, StoreError>;

    /// Inserts or replaces the cart for `cart.session_id`. Last writer wins.
    async fn save_cart(&self, cart: &Cart) -> Result<(), StoreError>;

    /// Deletes every cart matching `filter` and returns how many were removed.
    async fn delete_carts(&self, filter: &CartFilter) -> Result<usize, StoreError>;

    async fn count_carts(&self) -> Result<usize, StoreError>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_order(&self, id: &str) -> Result<Option<Order>, StoreError>;

    async fn save_order(&self, order: &Order) -> Result<(), StoreError>;

    /// Returns matching orders in no particular order.
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError>;

    async fn count_orders(&self) -> Result<usize, StoreError>;
}

/// Reachability probe run before the server accepts traffic.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}
