//! `PostgreSQL` implementation of the persistence gateway.
//!
//! Queries are runtime-checked (`sqlx::query_as` over row structs) and map
//! into the domain types at the boundary. Invalid stored data surfaces as
//! [`StoreError::DataCorruption`] rather than leaking raw rows upward.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use bistro_core::{CartItemId, Email, MenuItemId, PaymentId, ReviewId, UserId, UserRole};

use super::{EntityCounts, Store, StoreError};
use crate::models::{
    CartItem, MenuItem, MenuItemPatch, NewCartItem, NewMenuItem, NewPayment, NewReview, NewUser,
    Payment, PaymentReceipt, Review, User,
};

/// Persistence gateway backed by a `PostgreSQL` pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool (readiness probes).
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// =============================================================================
// Row types
// =============================================================================

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    role: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email)
            .map_err(|e| StoreError::DataCorruption(format!("invalid email in database: {e}")))?;
        let role = row
            .role
            .map(|r| {
                r.parse::<UserRole>().map_err(|e| {
                    StoreError::DataCorruption(format!("invalid role in database: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            id: UserId::from_uuid(row.id),
            email,
            name: row.name,
            role,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct MenuRow {
    id: Uuid,
    name: String,
    category: String,
    price: Decimal,
    recipe: String,
    image: String,
}

impl From<MenuRow> for MenuItem {
    fn from(row: MenuRow) -> Self {
        Self {
            id: MenuItemId::from_uuid(row.id),
            name: row.name,
            category: row.category,
            price: row.price,
            recipe: row.recipe,
            image: row.image,
        }
    }
}

#[derive(FromRow)]
struct ReviewRow {
    id: Uuid,
    name: String,
    details: String,
    rating: f64,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId::from_uuid(row.id),
            name: row.name,
            details: row.details,
            rating: row.rating,
        }
    }
}

#[derive(FromRow)]
struct CartRow {
    id: Uuid,
    email: String,
    menu_item_id: Uuid,
    name: String,
    image: String,
    price: Decimal,
}

impl TryFrom<CartRow> for CartItem {
    type Error = StoreError;

    fn try_from(row: CartRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email)
            .map_err(|e| StoreError::DataCorruption(format!("invalid email in database: {e}")))?;
        Ok(Self {
            id: CartItemId::from_uuid(row.id),
            email,
            menu_item_id: MenuItemId::from_uuid(row.menu_item_id),
            name: row.name,
            image: row.image,
            price: row.price,
        })
    }
}

#[derive(FromRow)]
struct PaymentRow {
    id: Uuid,
    email: String,
    total_amount: Decimal,
    cart_item_ids: Vec<Uuid>,
    menu_item_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = StoreError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email)
            .map_err(|e| StoreError::DataCorruption(format!("invalid email in database: {e}")))?;
        Ok(Self {
            id: PaymentId::from_uuid(row.id),
            email,
            total_amount: row.total_amount,
            cart_item_ids: row
                .cart_item_ids
                .into_iter()
                .map(CartItemId::from_uuid)
                .collect(),
            menu_item_ids: row
                .menu_item_ids
                .into_iter()
                .map(MenuItemId::from_uuid)
                .collect(),
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Store implementation
// =============================================================================

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, role, created_at FROM users ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserId, StoreError> {
        let id = UserId::new();
        sqlx::query("INSERT INTO users (id, email, name, created_at) VALUES ($1, $2, $3, $4)")
            .bind(id.as_uuid())
            .bind(user.email.as_str())
            .bind(&user.name)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return StoreError::Conflict("email already exists".to_owned());
                }
                StoreError::Database(e)
            })?;

        Ok(id)
    }

    async fn set_user_role(&self, id: UserId, role: UserRole) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(role.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_user(&self, id: UserId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_menu(&self) -> Result<Vec<MenuItem>, StoreError> {
        let rows = sqlx::query_as::<_, MenuRow>(
            "SELECT id, name, category, price, recipe, image FROM menu ORDER BY category, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    async fn find_menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, StoreError> {
        let row = sqlx::query_as::<_, MenuRow>(
            "SELECT id, name, category, price, recipe, image FROM menu WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MenuItem::from))
    }

    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<MenuItemId, StoreError> {
        let id = MenuItemId::new();
        sqlx::query(
            "INSERT INTO menu (id, name, category, price, recipe, image) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id.as_uuid())
        .bind(&item.name)
        .bind(&item.category)
        .bind(item.price)
        .bind(&item.recipe)
        .bind(&item.image)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update_menu_item(
        &self,
        id: MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<u64, StoreError> {
        if patch.is_empty() {
            // Nothing to change; report whether the row exists.
            let row = self.find_menu_item(id).await?;
            return Ok(u64::from(row.is_some()));
        }

        let result = sqlx::query(
            "UPDATE menu SET \
                 name = COALESCE($2, name), \
                 category = COALESCE($3, category), \
                 price = COALESCE($4, price), \
                 recipe = COALESCE($5, recipe), \
                 image = COALESCE($6, image) \
             WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(patch.name)
        .bind(patch.category)
        .bind(patch.price)
        .bind(patch.recipe)
        .bind(patch.image)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM menu WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT id, name, details, rating FROM reviews ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn insert_review(&self, review: NewReview) -> Result<ReviewId, StoreError> {
        let id = ReviewId::new();
        sqlx::query("INSERT INTO reviews (id, name, details, rating) VALUES ($1, $2, $3, $4)")
            .bind(id.as_uuid())
            .bind(&review.name)
            .bind(&review.details)
            .bind(review.rating)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn list_cart_items(&self, email: &str) -> Result<Vec<CartItem>, StoreError> {
        let rows = sqlx::query_as::<_, CartRow>(
            "SELECT id, email, menu_item_id, name, image, price FROM carts WHERE email = $1",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CartItem::try_from).collect()
    }

    async fn insert_cart_item(&self, item: NewCartItem) -> Result<CartItemId, StoreError> {
        let id = CartItemId::new();
        sqlx::query(
            "INSERT INTO carts (id, email, menu_item_id, name, image, price) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id.as_uuid())
        .bind(item.email.as_str())
        .bind(item.menu_item_id.as_uuid())
        .bind(&item.name)
        .bind(&item.image)
        .bind(item.price)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn delete_cart_item(&self, id: CartItemId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_payments_for(&self, email: &str) -> Result<Vec<Payment>, StoreError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, email, total_amount, cart_item_ids, menu_item_ids, created_at \
             FROM payments WHERE email = $1 ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, StoreError> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            "SELECT id, email, total_amount, cart_item_ids, menu_item_ids, created_at \
             FROM payments ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn record_payment(&self, payment: NewPayment) -> Result<PaymentReceipt, StoreError> {
        let id = PaymentId::new();
        let cart_ids: Vec<Uuid> = payment
            .cart_item_ids
            .iter()
            .map(|c| c.as_uuid())
            .collect();
        let menu_ids: Vec<Uuid> = payment
            .menu_item_ids
            .iter()
            .map(|m| m.as_uuid())
            .collect();

        // One transaction: the payment record and the cart clear commit or
        // roll back together.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO payments (id, email, total_amount, cart_item_ids, menu_item_ids, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id.as_uuid())
        .bind(payment.email.as_str())
        .bind(payment.total_amount)
        .bind(&cart_ids)
        .bind(&menu_ids)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM carts WHERE id = ANY($1)")
            .bind(&cart_ids)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(PaymentReceipt {
            payment_id: id,
            carts_deleted: deleted,
        })
    }

    async fn counts(&self) -> Result<EntityCounts, StoreError> {
        let users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let menu_items = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu")
            .fetch_one(&self.pool)
            .await?;
        let orders = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments")
            .fetch_one(&self.pool)
            .await?;

        Ok(EntityCounts {
            users,
            menu_items,
            orders,
        })
    }

    async fn total_revenue(&self) -> Result<Decimal, StoreError> {
        let sum = sqlx::query_scalar::<_, Option<Decimal>>("SELECT SUM(total_amount) FROM payments")
            .fetch_one(&self.pool)
            .await?;

        Ok(sum.unwrap_or(Decimal::ZERO))
    }
}
