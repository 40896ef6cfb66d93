//! Menu helpers

use super::models::{Category, GroupedMenu, MenuItem};

/// Splits a listing into the three storefront sections, keeping the input order
/// inside each section.
pub fn group_by_category(items: Vec<MenuItem>) -> GroupedMenu {
    let mut menu = GroupedMenu::default();
    for item in items {
        match item.category {
            Category::SmokedMeats => menu.smoked_meats.push(item),
            Category::Sides => menu.sides.push(item),
            Category::Sandwiches => menu.sandwiches.push(item),
        }
    }
    menu
}
