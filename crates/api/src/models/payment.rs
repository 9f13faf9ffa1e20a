//! Payment record domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bistro_core::{CartItemId, Email, MenuItemId, PaymentId};

/// An immutable audit record of a completed transaction.
///
/// Never mutated after insertion. The `cart_item_ids` name the cart lines
/// cleared by the same transaction; `menu_item_ids` feed the reporting
/// aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique payment ID.
    pub id: PaymentId,
    /// Paying user's email.
    pub email: Email,
    /// Total charged, in major currency units.
    pub total_amount: Decimal,
    /// Cart lines cleared by this payment.
    pub cart_item_ids: Vec<CartItemId>,
    /// Menu items purchased.
    pub menu_item_ids: Vec<MenuItemId>,
    /// When the payment was recorded.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub email: Email,
    pub total_amount: Decimal,
    pub cart_item_ids: Vec<CartItemId>,
    pub menu_item_ids: Vec<MenuItemId>,
}

/// Result of recording a payment and clearing the paid cart lines.
///
/// Mirrors the original API's `[insertResult, deleteResult]` response pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// ID of the inserted payment record.
    pub payment_id: PaymentId,
    /// How many cart lines were deleted.
    pub carts_deleted: u64,
}
