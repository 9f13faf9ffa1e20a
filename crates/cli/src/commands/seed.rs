//! Catalog seeding from JSON files.
//!
//! Accepts the same shapes the API accepts on its write routes, so a menu
//! export can be loaded verbatim.

use bistro_api::db::{PgStore, Store};
use bistro_api::models::{NewMenuItem, NewReview};

use super::CliError;

fn read_seed<T: serde::de::DeserializeOwned>(path: &str) -> Result<Vec<T>, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::ParseFile {
        path: path.to_owned(),
        source,
    })
}

/// Load menu items from a JSON array.
///
/// # Errors
///
/// Returns `CliError` if the file cannot be read or parsed, or an insert fails.
pub async fn menu(path: &str) -> Result<(), CliError> {
    let items: Vec<NewMenuItem> = read_seed(path)?;
    let store = PgStore::new(super::connect().await?);

    let total = items.len();
    for item in items {
        store.insert_menu_item(item).await?;
    }

    tracing::info!("Seeded {total} menu items from {path}");
    Ok(())
}

/// Load reviews from a JSON array.
///
/// # Errors
///
/// Returns `CliError` if the file cannot be read or parsed, or an insert fails.
pub async fn reviews(path: &str) -> Result<(), CliError> {
    let items: Vec<NewReview> = read_seed(path)?;
    let store = PgStore::new(super::connect().await?);

    let total = items.len();
    for review in items {
        store.insert_review(review).await?;
    }

    tracing::info!("Seeded {total} reviews from {path}");
    Ok(())
}
