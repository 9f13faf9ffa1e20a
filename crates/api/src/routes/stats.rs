//! Reporting route handlers.

use axum::{Json, Router, extract::State, routing::get};

use crate::db::Store;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::reporting::{AdminStats, CategorySales, order_stats};
use crate::state::AppState;

/// Build the stats router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin))
        .route("/orders", get(orders))
}

/// Dashboard counts and gross revenue.
pub async fn admin(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<AdminStats>> {
    let counts = state.store().counts().await?;
    let revenue = state.store().total_revenue().await?;
    Ok(Json(AdminStats::new(counts, revenue)))
}

/// Category sales grouping over all payments.
pub async fn orders(State(state): State<AppState>) -> Result<Json<Vec<CategorySales>>> {
    let payments = state.store().list_payments().await?;
    let menu = state.store().list_menu().await?;
    Ok(Json(order_stats(&payments, &menu)))
}
