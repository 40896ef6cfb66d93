//! Shopping Cart Business Logic Helpers
//!
//! This module contains helper functions for cart operations and formatting.

use super::models::{Cart, CartDebugLine, CartDebugView, CartLineItem};
use crate::{error::ServiceError, menu::models::MenuItem};
use chrono::{DateTime, Utc};

/// Validates a client-supplied quantity, which must be a positive integer.
pub fn validate_quantity(quantity: i64) -> Result<u32, ServiceError> {
    if quantity < 1 {
        return Err(ServiceError::invalid("Quantity must be at least 1"));
    }
    u32::try_from(quantity).map_err(|_| ServiceError::invalid(format!("Quantity {quantity} is too large")))
}

/// Merges `quantity` units of `menu_item` into `items`.
///
/// # Behaviour
///
/// * If a line already references the menu item, its `quantity` is increased
///   by the incoming quantity. Its name and price keep the values captured
///   when the line was created.
/// * Otherwise a new line is appended with the menu item's current name and
///   price.
///
/// At most one line per menu item id ever exists. Returns the merged line.
pub fn merge_line_item<'a>(
    items: &'a mut Vec<CartLineItem>,
    menu_item: &MenuItem,
    quantity: u32,
    now: DateTime<Utc>,
) -> Result<&'a CartLineItem, ServiceError> {
    match items.iter().position(|line| line.menu_item_id == menu_item.id) {
        Some(index) => {
            let line = &mut items[index];
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| ServiceError::invalid("Quantity is too large"))?;
            Ok(&items[index])
        }
        None => {
            items.push(CartLineItem::snapshot(menu_item, quantity, now));
            Ok(&items[items.len() - 1])
        }
    }
}

/// Finds a line by its line-local id.
pub fn find_line_mut<'a>(items: &'a mut [CartLineItem], line_id: &str) -> Option<&'a mut CartLineItem> {
    items.iter_mut().find(|line| line.id == line_id)
}

/// Produces a human-readable one-line summary for a list of cart items.
///
/// Example output: `"2x Texas Brisket, 1x Cornbread"`.
pub fn format_item_summary(items: &[CartLineItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn debug_view(cart: &Cart) -> CartDebugView {
    CartDebugView {
        session_id: cart.session_id.clone(),
        items: cart
            .items
            .iter()
            .map(|line| CartDebugLine {
                item_id: line.id.clone(),
                menu_item_id: line.menu_item_id.clone(),
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
            })
            .collect(),
        item_count: cart.item_count(),
        summary: format_item_summary(&cart.items),
        subtotal: cart.subtotal,
        total: cart.total,
        last_updated: cart.last_updated,
    }
}
