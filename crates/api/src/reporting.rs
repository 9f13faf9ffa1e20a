//! Aggregation over payments and the menu catalog.
//!
//! The aggregation itself is pure: handlers read the inputs through the
//! persistence gateway and the functions here do the joining and grouping.
//! That keeps the contract — inner-join semantics, empty-input totals —
//! testable without a database.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use bistro_core::MenuItemId;

use crate::db::EntityCounts;
use crate::models::{MenuItem, Payment};

/// Dashboard summary: collection counts plus gross revenue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub users: i64,
    pub menu_items: i64,
    pub orders: i64,
    pub revenue: Decimal,
}

impl AdminStats {
    /// Combine gateway reads into the dashboard shape.
    #[must_use]
    pub const fn new(counts: EntityCounts, revenue: Decimal) -> Self {
        Self {
            users: counts.users,
            menu_items: counts.menu_items,
            orders: counts.orders,
            revenue,
        }
    }
}

/// Per-category sales line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub category: String,
    pub quantity: u64,
    pub revenue: Decimal,
}

/// Group every purchased line item by menu category.
///
/// Each payment's `menu_item_ids` expand to one line item apiece and join
/// against the current catalog. The join is inner: ids whose menu item has
/// since been deleted drop out silently, contributing neither quantity nor
/// revenue. Revenue sums the *menu* price of each surviving line item.
/// Categories come back sorted by name.
#[must_use]
pub fn order_stats(payments: &[Payment], menu: &[MenuItem]) -> Vec<CategorySales> {
    let by_id: HashMap<MenuItemId, &MenuItem> = menu.iter().map(|m| (m.id, m)).collect();

    let mut groups: BTreeMap<&str, (u64, Decimal)> = BTreeMap::new();
    for payment in payments {
        for item_id in &payment.menu_item_ids {
            let Some(item) = by_id.get(item_id) else {
                continue;
            };
            let entry = groups.entry(item.category.as_str()).or_default();
            entry.0 += 1;
            entry.1 += item.price;
        }
    }

    groups
        .into_iter()
        .map(|(category, (quantity, revenue))| CategorySales {
            category: category.to_owned(),
            quantity,
            revenue,
        })
        .collect()
}
