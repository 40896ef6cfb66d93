//! Menu Domain Module
//!
//! This module contains the catalog side of the storefront:
//! - Domain models (MenuItem, Category, admin payloads)
//! - Grouping helpers for the storefront listing
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;

pub use handlers::routes;
