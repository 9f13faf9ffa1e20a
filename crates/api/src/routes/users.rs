//! User account route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use bistro_core::{UserId, UserRole};

use crate::db::{Store, StoreError};
use crate::error::Result;
use crate::middleware::{Identity, RequireAdmin};
use crate::models::{NewUser, User};
use crate::state::AppState;

use super::{Deleted, Updated};

/// Build the users router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(register))
        .route("/admin/{key}", get(admin_status).patch(grant_admin))
        .route("/{id}", axum::routing::delete(remove))
}

/// Registration result. `inserted_id` is null when the email already had an
/// account — the exists-sentinel, distinct from an error.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub inserted_id: Option<UserId>,
}

/// Admin-status probe result.
#[derive(Debug, Serialize)]
pub struct AdminStatus {
    pub admin: bool,
}

/// List every user.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>> {
    Ok(Json(state.store().list_users().await?))
}

/// Register a user, idempotently on email.
///
/// A second registration with the same email is a no-op returning the
/// exists-sentinel; a concurrent duplicate insert that loses the race is
/// folded into the same sentinel.
pub async fn register(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<Json<RegisterResponse>> {
    let exists_sentinel = RegisterResponse {
        message: Some("user already exists".to_owned()),
        inserted_id: None,
    };

    if state
        .store()
        .find_user_by_email(user.email.as_str())
        .await?
        .is_some()
    {
        return Ok(Json(exists_sentinel));
    }

    match state.store().insert_user(user).await {
        Ok(id) => Ok(Json(RegisterResponse {
            message: None,
            inserted_id: Some(id),
        })),
        Err(StoreError::Conflict(_)) => Ok(Json(exists_sentinel)),
        Err(e) => Err(e.into()),
    }
}

/// Report whether the addressed email belongs to an admin.
///
/// Requires authentication but not ownership; unknown emails are simply
/// not admins.
pub async fn admin_status(
    Identity(_claims): Identity,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>> {
    let user = state.store().find_user_by_email(&email).await?;
    Ok(Json(AdminStatus {
        admin: user.is_some_and(|u| u.is_admin()),
    }))
}

/// Grant the admin role to a user.
pub async fn grant_admin(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Updated>> {
    let id: UserId = id.parse()?;
    let modified = state.store().set_user_role(id, UserRole::Admin).await?;
    Ok(Json(Updated { modified }))
}

/// Remove a user account.
pub async fn remove(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>> {
    let id: UserId = id.parse()?;
    let deleted = state.store().delete_user(id).await?;
    Ok(Json(Deleted { deleted }))
}
