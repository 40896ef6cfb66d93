//! Orders Domain Module
//!
//! - Domain models (Order, OrderLineItem, OrderStatus, inputs, responses)
//! - Helpers for order numbers, validation and list filters
//! - The materializer that prices and freezes new orders
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod materializer;
pub mod models;

pub use handlers::routes;
pub use materializer::OrderMaterializer;
