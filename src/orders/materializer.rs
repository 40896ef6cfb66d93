//! Order Materializer
//!
//! Turns a proposed list of `(menu item id, quantity)` pairs into a priced,
//! immutable [`Order`]. Totals are computed once with the same rule the cart
//! uses and never touched again; only the status of an order can change.

use super::{
    helpers::{generate_order_number, order_filter_from_query, parse_status, validate_order_items},
    models::{Order, OrderItemInput, OrderLineItem, OrderQuery, OrderStatus},
};
use crate::{
    error::ServiceError,
    pricing::Totals,
    store::{CatalogStore, OrderStore},
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct OrderMaterializer {
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
}

impl OrderMaterializer {
    pub fn new(catalog: Arc<dyn CatalogStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { catalog, orders }
    }

    /// Prices and saves a new order in the `pending` state.
    ///
    /// All or nothing: if any menu item id fails to resolve, nothing is saved
    /// and the error names that id.
    pub async fn place_order(
        &self,
        items: Option<Vec<OrderItemInput>>,
        customer_info: Value,
    ) -> Result<Order, ServiceError> {
        let requested = validate_order_items(items)?;

        let mut lines = Vec::with_capacity(requested.len());
        for item in requested {
            let menu_item = self.catalog.find_menu_item(&item.menu_item_id).await?.ok_or_else(|| {
                ServiceError::not_found_with_details(
                    format!("Menu item {} not found", item.menu_item_id),
                    item.menu_item_id.clone(),
                )
            })?;
            lines.push(OrderLineItem {
                menu_item_id: item.menu_item_id,
                name: menu_item.name,
                price: menu_item.price,
                quantity: item.quantity,
            });
        }

        let Totals { subtotal, tax, total } = Totals::compute(&lines)?;
        let now = Utc::now();
        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            order_number: generate_order_number(now),
            items: lines,
            subtotal,
            tax,
            total,
            customer_info,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.orders.save_order(&order).await?;
        info!(order_number = %order.order_number, total = %order.total, "Order placed");
        Ok(order)
    }

    pub async fn get_order(&self, id: &str) -> Result<Order, ServiceError> {
        self.orders.find_order(id).await?.ok_or_else(|| ServiceError::not_found("Order not found"))
    }

    /// Lists orders matching the query, newest first.
    pub async fn list_orders(&self, query: &OrderQuery) -> Result<Vec<Order>, ServiceError> {
        let Some(filter) = order_filter_from_query(query)? else {
            return Ok(Vec::new());
        };
        let mut orders = self.orders.list_orders(&filter).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Overwrites the status of an order. Any status may follow any other.
    pub async fn update_status(&self, id: &str, status: Option<&str>) -> Result<Order, ServiceError> {
        let status = parse_status(status)?;
        let mut order = self.get_order(id).await?;
        if order.status.is_final() && order.status != status {
            warn!(order_number = %order.order_number, from = %order.status, to = %status, "Reopening a finished order");
        }
        order.status = status;
        order.updated_at = Utc::now();
        self.orders.save_order(&order).await?;
        info!(order_number = %order.order_number, %status, "Order status updated");
        Ok(order)
    }
}
