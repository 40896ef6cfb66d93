//! Menu Domain Models
//!
//! Catalog records as they are stored and served, plus the payloads used by
//! the administrative menu endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// =============================================================================
// Catalog Models
// =============================================================================

/// The closed set of menu sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    SmokedMeats,
    Sides,
    Sandwiches,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::SmokedMeats, Category::Sides, Category::Sandwiches];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SmokedMeats => "smokedMeats",
            Category::Sides => "sides",
            Category::Sandwiches => "sandwiches",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {s}"))
    }
}

fn default_true() -> bool {
    true
}

/// A sellable menu entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Portion text, e.g. "12 oz portion, served with two sides"
    pub serving: String,
    pub price: Decimal,
    pub category: Category,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub spicy: bool,
    /// Inactive items are hidden from the menu listing but can still be
    /// resolved by id.
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl MenuItem {
    /// Checks the catalog invariants: a non-empty name and a non-negative price.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Menu item name is required".into());
        }
        if self.price < Decimal::ZERO {
            return Err("Menu item price must not be negative".into());
        }
        Ok(())
    }
}

/// Payload for creating a menu item. Also the record format of seed files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub serving: String,
    pub price: Decimal,
    pub category: Category,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub spicy: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub image: String,
}

impl NewMenuItem {
    /// Assigns an id and creation time, trimming the name.
    pub fn into_menu_item(self) -> MenuItem {
        MenuItem {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name.trim().to_string(),
            description: self.description,
            serving: self.serving,
            price: self.price,
            category: self.category,
            popular: self.popular,
            spicy: self.spicy,
            active: self.active,
            image: self.image,
            created_at: Utc::now(),
        }
    }
}

/// Partial update for a menu item; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub serving: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<Category>,
    pub popular: Option<bool>,
    pub spicy: Option<bool>,
    pub active: Option<bool>,
    pub image: Option<String>,
}

impl MenuItemUpdate {
    pub fn apply_to(self, item: &mut MenuItem) {
        if let Some(name) = self.name {
            item.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(serving) = self.serving {
            item.serving = serving;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(popular) = self.popular {
            item.popular = popular;
        }
        if let Some(spicy) = self.spicy {
            item.spicy = spicy;
        }
        if let Some(active) = self.active {
            item.active = active;
        }
        if let Some(image) = self.image {
            item.image = image;
        }
    }
}

// =============================================================================
// Responses & Queries
// =============================================================================

/// Query string for `GET /api/menu`
#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// The menu as the storefront renders it: one list per section.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedMenu {
    pub smoked_meats: Vec<MenuItem>,
    pub sides: Vec<MenuItem>,
    pub sandwiches: Vec<MenuItem>,
}
