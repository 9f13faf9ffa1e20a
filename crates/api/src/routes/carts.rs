//! Shopping cart route handlers.
//!
//! Cart routes trust the owner key in the request, as the original API did;
//! payment history is where ownership is actually enforced.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use bistro_core::CartItemId;

use crate::db::Store;
use crate::error::Result;
use crate::models::{CartItem, NewCartItem};
use crate::state::AppState;

use super::{Deleted, Inserted};

/// Build the carts router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", axum::routing::delete(remove))
}

/// Owner filter for cart listing.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub email: Option<String>,
}

/// List the cart lines owned by the queried email.
///
/// No email means no owner to match, which is an empty cart.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> Result<Json<Vec<CartItem>>> {
    let items = match query.email {
        Some(email) => state.store().list_cart_items(&email).await?,
        None => Vec::new(),
    };
    Ok(Json(items))
}

/// Add a line to a cart.
pub async fn create(
    State(state): State<AppState>,
    Json(item): Json<NewCartItem>,
) -> Result<Json<Inserted<CartItemId>>> {
    let inserted_id = state.store().insert_cart_item(item).await?;
    Ok(Json(Inserted { inserted_id }))
}

/// Remove a line from a cart.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>> {
    let id: CartItemId = id.parse()?;
    let deleted = state.store().delete_cart_item(id).await?;
    Ok(Json(Deleted { deleted }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use bistro_core::{Email, MenuItemId};

    use super::*;
    use crate::test_support::test_state;

    fn line(email: &str) -> NewCartItem {
        NewCartItem {
            email: Email::parse(email).unwrap(),
            menu_item_id: MenuItemId::new(),
            name: "Margherita".to_owned(),
            image: "margherita.jpg".to_owned(),
            price: Decimal::new(1450, 2),
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_owner() {
        let state = test_state();
        state.store().insert_cart_item(line("a@example.com")).await.unwrap();
        state.store().insert_cart_item(line("a@example.com")).await.unwrap();
        state.store().insert_cart_item(line("b@example.com")).await.unwrap();

        let Json(items) = list(
            State(state.clone()),
            Query(CartQuery {
                email: Some("a@example.com".to_owned()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(items.len(), 2);

        let Json(items) = list(State(state), Query(CartQuery { email: None }))
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_remove_line() {
        let state = test_state();
        let id = state.store().insert_cart_item(line("a@example.com")).await.unwrap();

        let Json(result) = remove(State(state.clone()), Path(id.to_string()))
            .await
            .unwrap();
        assert_eq!(result.deleted, 1);
        assert!(state.store().list_cart_items("a@example.com").await.unwrap().is_empty());
    }
}
