//! Order helpers: order numbers, request validation and list filters.

use super::models::{OrderItemInput, OrderQuery, OrderStatus};
use crate::{cart::helpers::validate_quantity, error::ServiceError, store::OrderFilter};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rand::Rng;

pub const ORDER_NUMBER_PREFIX: &str = "ORD";

/// Builds `ORD-<unix millis>-<0..1000>`. Readable, not guaranteed unique.
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    let disambiguator: u16 = rand::thread_rng().gen_range(0..1000);
    format!("{ORDER_NUMBER_PREFIX}-{}-{disambiguator}", now.timestamp_millis())
}

/// A requested `(menu item id, quantity)` pair that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedItem {
    pub menu_item_id: String,
    pub quantity: u32,
}

/// Checks the whole item list before any catalog lookup happens.
pub fn validate_order_items(items: Option<Vec<OrderItemInput>>) -> Result<Vec<RequestedItem>, ServiceError> {
    let items = match items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(ServiceError::invalid("No items in order")),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| -> Result<RequestedItem, ServiceError> {
            let menu_item_id = item
                .menu_item_id
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| ServiceError::invalid(format!("Order item {index} is missing menuItemId")))?;
            let quantity = validate_quantity(item.quantity.unwrap_or(1))?;
            Ok(RequestedItem { menu_item_id, quantity })
        })
        .collect()
}

pub fn parse_status(status: Option<&str>) -> Result<OrderStatus, ServiceError> {
    status
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ServiceError::invalid("Invalid status"))
}

/// Which end of a day a bare `YYYY-MM-DD` date stands for.
#[derive(Debug, Clone, Copy)]
enum DayBound {
    Start,
    End,
}

fn parse_date(raw: &str, bound: DayBound) -> Result<DateTime<Utc>, ServiceError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ServiceError::invalid(format!("Invalid date: {raw}")))?;
    let naive = match bound {
        DayBound::Start => date.and_hms_milli_opt(0, 0, 0, 0),
        DayBound::End => date.and_hms_milli_opt(23, 59, 59, 999),
    }
    .ok_or_else(|| ServiceError::invalid(format!("Invalid date: {raw}")))?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Turns the list query string into a store filter.
///
/// Returns `Ok(None)` when the status names no known state: such a filter can
/// match nothing, so the caller answers with an empty list.
pub fn order_filter_from_query(query: &OrderQuery) -> Result<Option<OrderFilter>, ServiceError> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => match raw.parse::<OrderStatus>() {
            Ok(status) => Some(status),
            Err(_) => return Ok(None),
        },
        None => None,
    };
    let created_from = query
        .start_date
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| parse_date(s, DayBound::Start))
        .transpose()?;
    let created_to = query
        .end_date
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| parse_date(s, DayBound::End))
        .transpose()?;
    Ok(Some(OrderFilter { status, created_from, created_to }))
}
