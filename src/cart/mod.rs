//! Shopping Cart Domain Module
//!
//! This module contains all session cart business logic, including:
//! - Domain models (Cart, CartLineItem, inputs, responses)
//! - Business logic helpers (line merging, quantity validation, formatting)
//! - The cart engine that keeps totals consistent across mutations
//! - REST API handlers

pub mod engine;
pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use engine::CartEngine;
pub use handlers::routes;
