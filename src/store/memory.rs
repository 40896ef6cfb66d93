//! In-process document store
//!
//! Each collection is a `DashMap` keyed by the document's primary key, so
//! handlers can read and write concurrently without an outer lock. Reads hand
//! out clones; writes replace the whole document.

use super::{
    CartFilter, CartStore, CatalogStore, MenuFilter, OrderFilter, OrderStore, StoreError, StoreHealth,
};
use crate::{cart::models::Cart, menu::models::MenuItem, orders::models::Order};
use async_trait::async_trait;
use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Menu items keyed by id.
    menu_items: DashMap<String, MenuItem>,
    /// Carts keyed by session id.
    carts: DashMap<String, Cart>,
    /// Orders keyed by document id.
    orders: DashMap<String, Order>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_menu_item(&self, id: &str) -> Result<Option<MenuItem>, StoreError> {
        Ok(self.menu_items.get(id).map(|entry| entry.value().clone()))
    }

    async fn list_menu_items(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>, StoreError> {
        let mut items: Vec<MenuItem> = self
            .menu_items
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| {
            a.category.as_str().cmp(b.category.as_str()).then_with(|| a.name.cmp(&b.name))
        });
        Ok(items)
    }

    async fn save_menu_item(&self, item: &MenuItem) -> Result<(), StoreError> {
        self.menu_items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn delete_menu_item(&self, id: &str) -> Result<Option<MenuItem>, StoreError> {
        Ok(self.menu_items.remove(id).map(|(_, item)| item))
    }

    async fn count_menu_items(&self) -> Result<usize, StoreError> {
        Ok(self.menu_items.len())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn find_cart(&self, session_id: &str) -> Result<Option<Cart>, StoreError> {
        Ok(self.carts.get(session_id).map(|entry| entry.value().clone()))
    }

    async fn save_cart(&self, cart: &Cart) -> Result<(), StoreError> {
        self.carts.insert(cart.session_id.clone(), cart.clone());
        Ok(())
    }

    async fn delete_carts(&self, filter: &CartFilter) -> Result<usize, StoreError> {
        let before = self.carts.len();
        self.carts.retain(|_, cart| !filter.matches(cart));
        Ok(before.saturating_sub(self.carts.len()))
    }

    async fn count_carts(&self) -> Result<usize, StoreError> {
        Ok(self.carts.len())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn find_order(&self, id: &str) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(id).map(|entry| entry.value().clone()))
    }

    async fn save_order(&self, order: &Order) -> Result<(), StoreError> {
        self.orders.insert(order.id.clone(), order.clone());
        Ok(())
    }

    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn count_orders(&self) -> Result<usize, StoreError> {
        Ok(self.orders.len())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
