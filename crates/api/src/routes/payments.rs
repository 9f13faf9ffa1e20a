//! Payment route handlers.
//!
//! Two independent top-level operations: creating a gateway intent for the
//! browser to confirm, and recording the completed payment while clearing
//! the paid cart lines.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bistro_core::minor_units;

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::middleware::{Identity, require_owner};
use crate::models::{NewPayment, Payment, PaymentReceipt};
use crate::state::AppState;

/// Build the payments router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(record))
        .route("/intent", post(create_intent))
        .route("/history/{email}", get(history))
}

/// Request body for intent creation.
#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    pub price: Decimal,
}

/// Intent creation response: the secret the browser confirms with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    pub client_secret: String,
}

/// List the authenticated user's own payment history.
///
/// The path email must match the token's email; any mismatch is 403
/// regardless of whether matching records exist.
pub async fn history(
    Identity(claims): Identity,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Payment>>> {
    require_owner(&claims, &email)?;
    Ok(Json(state.store().list_payments_for(&email).await?))
}

/// Create a payment intent with the gateway.
///
/// The price arrives in major units and is converted to integer cents by
/// truncation before it reaches the gateway.
pub async fn create_intent(
    State(state): State<AppState>,
    Json(body): Json<IntentRequest>,
) -> Result<Json<IntentResponse>> {
    let amount = minor_units(body.price)
        .ok_or_else(|| AppError::InvalidArgument("price must be a positive number".to_owned()))?;

    let intent = state.payments().create_intent(amount).await?;

    Ok(Json(IntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// Record a completed payment and clear the cart lines it paid for.
pub async fn record(
    State(state): State<AppState>,
    Json(payment): Json<NewPayment>,
) -> Result<Json<PaymentReceipt>> {
    Ok(Json(state.store().record_payment(payment).await?))
}
