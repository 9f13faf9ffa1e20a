//! Menu catalog route handlers.
//!
//! Reads are public; every write requires the admin role.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use bistro_core::MenuItemId;

use crate::db::Store;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{MenuItem, MenuItemPatch, NewMenuItem};
use crate::state::AppState;

use super::{Deleted, Inserted, Updated};

/// Build the menu router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).patch(update).delete(remove))
}

/// List the whole catalog.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>> {
    Ok(Json(state.store().list_menu().await?))
}

/// Fetch one item; missing ids answer `null`, not 404.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<MenuItem>>> {
    let id: MenuItemId = id.parse()?;
    Ok(Json(state.store().find_menu_item(id).await?))
}

/// Add a dish to the catalog.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(item): Json<NewMenuItem>,
) -> Result<Json<Inserted<MenuItemId>>> {
    let inserted_id = state.store().insert_menu_item(item).await?;
    Ok(Json(Inserted { inserted_id }))
}

/// Merge-update a dish; only provided fields change.
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<MenuItemPatch>,
) -> Result<Json<Updated>> {
    let id: MenuItemId = id.parse()?;
    let modified = state.store().update_menu_item(id, patch).await?;
    Ok(Json(Updated { modified }))
}

/// Remove a dish from the catalog.
pub async fn remove(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>> {
    let id: MenuItemId = id.parse()?;
    let deleted = state.store().delete_menu_item(id).await?;
    Ok(Json(Deleted { deleted }))
}
