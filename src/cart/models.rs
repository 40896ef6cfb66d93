//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to session carts: the
//! stored cart document, its line items, and the request/response payloads of
//! the cart endpoints.

use crate::{
    menu::models::MenuItem,
    pricing::{PricingError, Priced, Totals},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// One menu item in a cart.
///
/// `name` and `price` are copied from the catalog when the line is created, so
/// later menu price changes do not reprice a cart that already holds the item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Line-local id. This is the `:itemId` accepted by the update and remove endpoints.
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    pub price: Decimal,
    /// Always >= 1
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    pub fn snapshot(menu_item: &MenuItem, quantity: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            menu_item_id: menu_item.id.clone(),
            name: menu_item.name.clone(),
            price: menu_item.price,
            quantity,
            added_at: now,
        }
    }
}

impl Priced for CartLineItem {
    fn unit_price(&self) -> Decimal {
        self.price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// The cart document for one session.
///
/// `subtotal`, `tax` and `total` are a cache of [`Totals::compute`] over
/// `items`; call [`Cart::recompute_totals`] after touching `items` and before
/// handing the cart out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub session_id: String,
    pub items: Vec<CartLineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Cart {
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            created_at: now,
            last_updated: now,
        }
    }

    pub fn recompute_totals(&mut self) -> Result<(), PricingError> {
        let Totals { subtotal, tax, total } = Totals::compute(&self.items)?;
        self.subtotal = subtotal;
        self.tax = tax;
        self.total = total;
        Ok(())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Request & Response Payloads
// =============================================================================

/// Body of `POST /api/cart/:sessionId/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub menu_item_id: String,
    /// Defaults to 1 when omitted
    pub quantity: Option<i64>,
}

/// Body of `PUT /api/cart/:sessionId/items/:itemId`
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityInput {
    pub quantity: Option<i64>,
}

/// Response for operations that only report an outcome
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Flattened view served by `GET /api/cart/:sessionId/debug`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDebugView {
    pub session_id: String,
    pub items: Vec<CartDebugLine>,
    pub item_count: usize,
    /// e.g. `"2x Texas Brisket, 1x Cornbread"`
    pub summary: String,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDebugLine {
    pub item_id: String,
    pub menu_item_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}
