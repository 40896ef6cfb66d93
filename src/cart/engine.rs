//! Cart Engine
//!
//! Owns the one-cart-per-session rule. Every operation loads the session's
//! cart document, changes it, recomputes the derived totals and writes the
//! whole document back. There is no locking: two concurrent writes to the same
//! session race and the last save wins.

use super::{
    helpers::{find_line_mut, merge_line_item, validate_quantity},
    models::Cart,
};
use crate::{
    error::ServiceError,
    store::{CartStore, CatalogStore},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct CartEngine {
    catalog: Arc<dyn CatalogStore>,
    carts: Arc<dyn CartStore>,
}

impl CartEngine {
    pub fn new(catalog: Arc<dyn CatalogStore>, carts: Arc<dyn CartStore>) -> Self {
        Self { catalog, carts }
    }

    /// Returns the session's cart, creating and saving an empty one if none exists.
    pub async fn get_or_create(&self, session_id: &str) -> Result<Cart, ServiceError> {
        let mut cart = match self.carts.find_cart(session_id).await? {
            Some(cart) => cart,
            None => {
                let cart = Cart::new(session_id);
                self.carts.save_cart(&cart).await?;
                info!(session_id, "Created cart");
                cart
            }
        };
        cart.recompute_totals()?;
        Ok(cart)
    }

    /// Returns the session's cart without creating it.
    pub async fn find(&self, session_id: &str) -> Result<Cart, ServiceError> {
        let mut cart = self.existing_cart(session_id).await?;
        cart.recompute_totals()?;
        Ok(cart)
    }

    /// Adds `quantity` (default 1) of a menu item, merging into an existing line
    /// for the same menu item.
    ///
    /// Inactive menu items can still be added; only the menu listing hides them.
    pub async fn add_item(
        &self,
        session_id: &str,
        menu_item_id: &str,
        quantity: Option<i64>,
    ) -> Result<Cart, ServiceError> {
        let quantity = validate_quantity(quantity.unwrap_or(1))?;
        let menu_item = self
            .catalog
            .find_menu_item(menu_item_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Menu item not found"))?;

        let mut cart = self.carts.find_cart(session_id).await?.unwrap_or_else(|| Cart::new(session_id));
        let now = Utc::now();
        let line_quantity = merge_line_item(&mut cart.items, &menu_item, quantity, now)?.quantity;

        self.commit(&mut cart).await?;
        info!(session_id, menu_item_id, quantity = line_quantity, lines = cart.item_count(), "Added item to cart");
        Ok(cart)
    }

    /// Sets the quantity of the line with line-local id `line_id`.
    pub async fn update_quantity(
        &self,
        session_id: &str,
        line_id: &str,
        quantity: Option<i64>,
    ) -> Result<Cart, ServiceError> {
        let quantity = match quantity {
            Some(q) => validate_quantity(q)?,
            None => return Err(ServiceError::invalid("Quantity must be at least 1")),
        };
        let mut cart = self.existing_cart(session_id).await?;
        let line = find_line_mut(&mut cart.items, line_id).ok_or_else(|| line_not_found(line_id))?;
        line.quantity = quantity;

        self.commit(&mut cart).await?;
        Ok(cart)
    }

    /// Removes the line with line-local id `line_id`.
    pub async fn remove_item(&self, session_id: &str, line_id: &str) -> Result<Cart, ServiceError> {
        let mut cart = self.existing_cart(session_id).await?;
        let before = cart.items.len();
        cart.items.retain(|line| line.id != line_id);
        if cart.items.len() == before {
            return Err(line_not_found(line_id));
        }

        self.commit(&mut cart).await?;
        info!(session_id, line_id, "Removed line item");
        Ok(cart)
    }

    /// Empties the cart and zeroes its totals. The cart document itself is kept.
    pub async fn clear(&self, session_id: &str) -> Result<Cart, ServiceError> {
        let mut cart = self.existing_cart(session_id).await?;
        cart.items.clear();

        self.commit(&mut cart).await?;
        info!(session_id, "Cleared cart");
        Ok(cart)
    }

    async fn existing_cart(&self, session_id: &str) -> Result<Cart, ServiceError> {
        self.carts
            .find_cart(session_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Cart not found"))
    }

    /// Terminal step of every mutation.
    async fn commit(&self, cart: &mut Cart) -> Result<(), ServiceError> {
        cart.recompute_totals()?;
        cart.last_updated = Utc::now();
        self.carts.save_cart(cart).await?;
        Ok(())
    }
}

fn line_not_found(line_id: &str) -> ServiceError {
    ServiceError::not_found_with_details("Item not found in cart", format!("Item with id {line_id} not found"))
}
