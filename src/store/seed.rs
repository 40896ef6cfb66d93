//! Catalog seeding
//!
//! Fills an empty catalog with the restaurant menu, either from a JSON file
//! named in the configuration or from the menu bundled with the binary.

use super::{CatalogStore, StoreError};
use crate::menu::models::NewMenuItem;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// The menu shipped with the server.
pub const BUNDLED_MENU: &str = include_str!("../../seed/menu.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Could not read seed file {path}. {source}")]
    Io { path: String, source: std::io::Error },
    #[error("Seed data is not a valid menu. {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Seed item '{name}' is invalid. {reason}")]
    InvalidItem { name: String, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub fn parse_menu(json: &str) -> Result<Vec<NewMenuItem>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

pub async fn load_menu_file(path: &Path) -> Result<Vec<NewMenuItem>, SeedError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io { path: path.display().to_string(), source })?;
    parse_menu(&json)
}

/// Inserts `items` when the catalog holds no menu items yet.
///
/// Returns the number of items inserted, which is zero when the catalog was
/// already populated. Every item is validated before anything is written.
pub async fn seed_if_empty(catalog: &dyn CatalogStore, items: Vec<NewMenuItem>) -> Result<usize, SeedError> {
    if catalog.count_menu_items().await? > 0 {
        info!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    let items = items
        .into_iter()
        .map(|new_item| {
            let item = new_item.into_menu_item();
            match item.validate() {
                Ok(()) => Ok(item),
                Err(reason) => Err(SeedError::InvalidItem { name: item.name, reason }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    for item in &items {
        catalog.save_menu_item(item).await?;
        info!("Seeded {}: ${} ({})", item.name, item.price, item.category);
    }
    Ok(items.len())
}

/// Seeds an empty catalog from `seed_file`, or from the bundled menu when no file is given.
pub async fn seed_catalog(catalog: &dyn CatalogStore, seed_file: Option<&Path>) -> Result<usize, SeedError> {
    let items = match seed_file {
        Some(path) => {
            info!("Seeding catalog from {}", path.display());
            load_menu_file(path).await?
        }
        None => parse_menu(BUNDLED_MENU)?,
    };
    seed_if_empty(catalog, items).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, MenuFilter};

    #[test]
    fn bundled_menu_parses() {
        let items = parse_menu(BUNDLED_MENU).unwrap();
        assert_eq!(items.len(), 11);
        assert!(items.iter().all(|i| i.active));
    }

    #[tokio::test]
    async fn seeds_only_an_empty_catalog() {
        let store = MemoryStore::new();
        let inserted = seed_if_empty(&store, parse_menu(BUNDLED_MENU).unwrap()).await.unwrap();
        assert_eq!(inserted, 11);

        let again = seed_if_empty(&store, parse_menu(BUNDLED_MENU).unwrap()).await.unwrap();
        assert_eq!(again, 0);
        assert_eq!(store.list_menu_items(&MenuFilter::default()).await.unwrap().len(), 11);
    }

    #[tokio::test]
    async fn rejects_invalid_items_without_writing() {
        let store = MemoryStore::new();
        let items = parse_menu(
            r#"[
                {"name": "Brisket", "description": "", "serving": "", "price": 10, "category": "smokedMeats"},
                {"name": "Refund", "description": "", "serving": "", "price": -1, "category": "sides"}
            ]"#,
        )
        .unwrap();
        let err = seed_if_empty(&store, items).await.unwrap_err();
        assert!(matches!(err, SeedError::InvalidItem { ref name, .. } if name == "Refund"));
        assert_eq!(store.count_menu_items().await.unwrap(), 0);
    }

    #[test]
    fn unknown_category_is_a_parse_error() {
        let err = parse_menu(
            r#"[{"name": "Pie", "description": "", "serving": "", "price": 4, "category": "desserts"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }
}
