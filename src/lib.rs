//! Smokey Storefront Library
//!
//! This library provides the core functionality for the restaurant storefront
//! backend: menu browsing, session-scoped carts with derived totals, and order
//! placement and tracking.

// Domain modules
pub mod cart;
pub mod menu;
pub mod orders;
pub mod pricing;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
pub mod store;
