//! Shopping cart domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bistro_core::{CartItemId, Email, MenuItemId};

/// A line in a user's cart.
///
/// Carries a snapshot of the menu item's display fields so the cart stays
/// renderable even if the catalog entry changes afterwards. Cart lines are
/// created and deleted, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Unique cart item ID.
    pub id: CartItemId,
    /// Owner's email.
    pub email: Email,
    /// The menu item this line refers to.
    pub menu_item_id: MenuItemId,
    /// Dish name at time of adding.
    pub name: String,
    /// Image URL at time of adding.
    pub image: String,
    /// Price at time of adding.
    pub price: Decimal,
}

/// Input for adding a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub email: Email,
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub image: String,
    pub price: Decimal,
}
