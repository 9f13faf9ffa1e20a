//! Menu catalog domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bistro_core::MenuItemId;

/// A dish on the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Unique menu item ID.
    pub id: MenuItemId,
    /// Dish name.
    pub name: String,
    /// Category used for grouping ("salad", "pizza", "dessert", ...).
    pub category: String,
    /// Price in major currency units.
    pub price: Decimal,
    /// Short description of the dish.
    pub recipe: String,
    /// Image URL.
    pub image: String,
}

/// Input for creating a menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub recipe: String,
    pub image: String,
}

/// Partial update for a menu item; only provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub recipe: Option<String>,
    pub image: Option<String>,
}

impl MenuItemPatch {
    /// Whether the patch changes anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.recipe.is_none()
            && self.image.is_none()
    }

    /// Apply the patch to an item, merge-style.
    pub fn apply(&self, item: &mut MenuItem) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(category) = &self.category {
            item.category.clone_from(category);
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(recipe) = &self.recipe {
            item.recipe.clone_from(recipe);
        }
        if let Some(image) = &self.image {
            item.image.clone_from(image);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_merges_only_provided_fields() {
        let mut item = MenuItem {
            id: MenuItemId::new(),
            name: "Caesar Salad".to_owned(),
            category: "salad".to_owned(),
            price: Decimal::new(1250, 2),
            recipe: "Romaine, parmesan, croutons".to_owned(),
            image: "caesar.jpg".to_owned(),
        };

        let patch = MenuItemPatch {
            price: Some(Decimal::new(1399, 2)),
            ..MenuItemPatch::default()
        };
        patch.apply(&mut item);

        assert_eq!(item.price, Decimal::new(1399, 2));
        assert_eq!(item.name, "Caesar Salad");
        assert_eq!(item.category, "salad");
    }

    #[test]
    fn test_empty_patch() {
        assert!(MenuItemPatch::default().is_empty());
        let patch = MenuItemPatch {
            name: Some("x".to_owned()),
            ..MenuItemPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
