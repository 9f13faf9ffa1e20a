//! Persistence gateway for the Bistro collections.
//!
//! The [`Store`] trait is the single seam between request handling and the
//! backing database. Production wires in [`PgStore`]; the test suites build
//! a fresh [`MemoryStore`] per test, which is what gives guard and handler
//! tests their isolation.
//!
//! ## Collections
//!
//! - `users` - accounts and roles
//! - `menu` - the dish catalog
//! - `reviews` - public testimonials
//! - `carts` - per-user cart lines
//! - `payments` - immutable transaction records

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use bistro_core::{CartItemId, MenuItemId, ReviewId, UserId, UserRole};

use crate::models::{
    CartItem, MenuItem, MenuItemPatch, NewCartItem, NewMenuItem, NewPayment, NewReview, NewUser,
    Payment, PaymentReceipt, Review, User,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors surfaced by the persistence gateway.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Collection cardinalities for the admin dashboard.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    pub users: i64,
    pub menu_items: i64,
    pub orders: i64,
}

/// Abstract interface over the five collections.
///
/// Mutations report affected-row counts so handlers can surface the
/// original API's matched/deleted result shapes. Reads of missing rows are
/// `Ok(None)`, never an error.
#[async_trait]
pub trait Store: Send + Sync {
    // --- users ---

    /// Find a user by email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// List every user.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Insert a user. Fails with [`StoreError::Conflict`] on a duplicate email.
    async fn insert_user(&self, user: NewUser) -> Result<UserId, StoreError>;

    /// Set a user's role. Returns the number of matched rows (0 or 1).
    async fn set_user_role(&self, id: UserId, role: UserRole) -> Result<u64, StoreError>;

    /// Delete a user. Returns the number of deleted rows (0 or 1).
    async fn delete_user(&self, id: UserId) -> Result<u64, StoreError>;

    // --- menu ---

    /// List the whole catalog.
    async fn list_menu(&self) -> Result<Vec<MenuItem>, StoreError>;

    /// Find one menu item.
    async fn find_menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, StoreError>;

    /// Insert a menu item.
    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<MenuItemId, StoreError>;

    /// Merge-update a menu item. Returns the number of matched rows (0 or 1).
    async fn update_menu_item(
        &self,
        id: MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<u64, StoreError>;

    /// Delete a menu item. Returns the number of deleted rows (0 or 1).
    async fn delete_menu_item(&self, id: MenuItemId) -> Result<u64, StoreError>;

    // --- reviews ---

    /// List every review.
    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError>;

    /// Insert a review (seeding path).
    async fn insert_review(&self, review: NewReview) -> Result<ReviewId, StoreError>;

    // --- carts ---

    /// List the cart lines owned by `email`.
    async fn list_cart_items(&self, email: &str) -> Result<Vec<CartItem>, StoreError>;

    /// Add a cart line.
    async fn insert_cart_item(&self, item: NewCartItem) -> Result<CartItemId, StoreError>;

    /// Delete a cart line. Returns the number of deleted rows (0 or 1).
    async fn delete_cart_item(&self, id: CartItemId) -> Result<u64, StoreError>;

    // --- payments ---

    /// List payments made by `email`, newest first.
    async fn list_payments_for(&self, email: &str) -> Result<Vec<Payment>, StoreError>;

    /// List every payment (reporting read).
    async fn list_payments(&self) -> Result<Vec<Payment>, StoreError>;

    /// Record a payment and delete the cart lines it names, atomically.
    async fn record_payment(&self, payment: NewPayment) -> Result<PaymentReceipt, StoreError>;

    // --- reporting reads ---

    /// Cardinalities of users, menu items, and payments.
    async fn counts(&self) -> Result<EntityCounts, StoreError>;

    /// Sum of `total_amount` over all payments; zero when there are none.
    async fn total_revenue(&self) -> Result<Decimal, StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
