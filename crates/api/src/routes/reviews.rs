//! Review route handlers.

use axum::{Json, Router, extract::State, routing::get};

use crate::db::Store;
use crate::error::Result;
use crate::models::Review;
use crate::state::AppState;

/// Build the reviews router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list))
}

/// List every testimonial. Reviews are seeded via the CLI; there is no
/// public write path.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    Ok(Json(state.store().list_reviews().await?))
}
