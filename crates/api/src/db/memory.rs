//! In-memory implementation of the persistence gateway.
//!
//! Backs the test suites: each test constructs its own `MemoryStore`, which
//! is how the store dependency gets scoped per test. Semantics mirror
//! [`super::PgStore`], including the unique-email conflict and the atomic
//! payment-plus-cart-clear write (both steps happen under one write lock).

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use bistro_core::{CartItemId, MenuItemId, PaymentId, ReviewId, UserId, UserRole};

use super::{EntityCounts, Store, StoreError};
use crate::models::{
    CartItem, MenuItem, MenuItemPatch, NewCartItem, NewMenuItem, NewPayment, NewReview, NewUser,
    Payment, PaymentReceipt, Review, User,
};

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    menu: Vec<MenuItem>,
    reviews: Vec<Review>,
    carts: Vec<CartItem>,
    payments: Vec<Payment>,
}

/// Persistence gateway holding everything in process memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().expect("store lock poisoned")
    }
}

fn count_of(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let data = self.lock();
        Ok(data.users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.lock().users.clone())
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserId, StoreError> {
        let mut data = self.lock();
        if data.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("email already exists".to_owned()));
        }

        let id = UserId::new();
        data.users.push(User {
            id,
            email: user.email,
            name: user.name,
            role: None,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn set_user_role(&self, id: UserId, role: UserRole) -> Result<u64, StoreError> {
        let mut data = self.lock();
        match data.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.role = Some(role);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_user(&self, id: UserId) -> Result<u64, StoreError> {
        let mut data = self.lock();
        let before = data.users.len();
        data.users.retain(|u| u.id != id);
        Ok((before - data.users.len()) as u64)
    }

    async fn list_menu(&self) -> Result<Vec<MenuItem>, StoreError> {
        Ok(self.lock().menu.clone())
    }

    async fn find_menu_item(&self, id: MenuItemId) -> Result<Option<MenuItem>, StoreError> {
        let data = self.lock();
        Ok(data.menu.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<MenuItemId, StoreError> {
        let mut data = self.lock();
        let id = MenuItemId::new();
        data.menu.push(MenuItem {
            id,
            name: item.name,
            category: item.category,
            price: item.price,
            recipe: item.recipe,
            image: item.image,
        });
        Ok(id)
    }

    async fn update_menu_item(
        &self,
        id: MenuItemId,
        patch: MenuItemPatch,
    ) -> Result<u64, StoreError> {
        let mut data = self.lock();
        match data.menu.iter_mut().find(|m| m.id == id) {
            Some(item) => {
                patch.apply(item);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> Result<u64, StoreError> {
        let mut data = self.lock();
        let before = data.menu.len();
        data.menu.retain(|m| m.id != id);
        Ok((before - data.menu.len()) as u64)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        Ok(self.lock().reviews.clone())
    }

    async fn insert_review(&self, review: NewReview) -> Result<ReviewId, StoreError> {
        let mut data = self.lock();
        let id = ReviewId::new();
        data.reviews.push(Review {
            id,
            name: review.name,
            details: review.details,
            rating: review.rating,
        });
        Ok(id)
    }

    async fn list_cart_items(&self, email: &str) -> Result<Vec<CartItem>, StoreError> {
        let data = self.lock();
        Ok(data
            .carts
            .iter()
            .filter(|c| c.email.as_str() == email)
            .cloned()
            .collect())
    }

    async fn insert_cart_item(&self, item: NewCartItem) -> Result<CartItemId, StoreError> {
        let mut data = self.lock();
        let id = CartItemId::new();
        data.carts.push(CartItem {
            id,
            email: item.email,
            menu_item_id: item.menu_item_id,
            name: item.name,
            image: item.image,
            price: item.price,
        });
        Ok(id)
    }

    async fn delete_cart_item(&self, id: CartItemId) -> Result<u64, StoreError> {
        let mut data = self.lock();
        let before = data.carts.len();
        data.carts.retain(|c| c.id != id);
        Ok((before - data.carts.len()) as u64)
    }

    async fn list_payments_for(&self, email: &str) -> Result<Vec<Payment>, StoreError> {
        let data = self.lock();
        let mut payments: Vec<Payment> = data
            .payments
            .iter()
            .filter(|p| p.email.as_str() == email)
            .cloned()
            .collect();
        payments.reverse();
        Ok(payments)
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, StoreError> {
        Ok(self.lock().payments.clone())
    }

    async fn record_payment(&self, payment: NewPayment) -> Result<PaymentReceipt, StoreError> {
        // Single lock section: the payment insert and the cart clear are
        // indivisible, matching the Postgres transaction.
        let mut data = self.lock();

        let id = PaymentId::new();
        data.payments.push(Payment {
            id,
            email: payment.email,
            total_amount: payment.total_amount,
            cart_item_ids: payment.cart_item_ids.clone(),
            menu_item_ids: payment.menu_item_ids,
            created_at: Utc::now(),
        });

        let before = data.carts.len();
        data.carts.retain(|c| !payment.cart_item_ids.contains(&c.id));
        let deleted = (before - data.carts.len()) as u64;

        Ok(PaymentReceipt {
            payment_id: id,
            carts_deleted: deleted,
        })
    }

    async fn counts(&self) -> Result<EntityCounts, StoreError> {
        let data = self.lock();
        Ok(EntityCounts {
            users: count_of(data.users.len()),
            menu_items: count_of(data.menu.len()),
            orders: count_of(data.payments.len()),
        })
    }

    async fn total_revenue(&self) -> Result<Decimal, StoreError> {
        let data = self.lock();
        Ok(data.payments.iter().map(|p| p.total_amount).sum())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bistro_core::Email;

    fn new_cart_item(email: &str) -> NewCartItem {
        NewCartItem {
            email: Email::parse(email).unwrap(),
            menu_item_id: MenuItemId::new(),
            name: "Margherita".to_owned(),
            image: "margherita.jpg".to_owned(),
            price: Decimal::new(1450, 2),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let new_user = NewUser {
            email: Email::parse("diner@example.com").unwrap(),
            name: "Diner".to_owned(),
        };

        store.insert_user(new_user.clone()).await.unwrap();
        let err = store.insert_user(new_user).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_record_payment_clears_named_carts() {
        let store = MemoryStore::new();
        let a = store.insert_cart_item(new_cart_item("a@example.com")).await.unwrap();
        let b = store.insert_cart_item(new_cart_item("a@example.com")).await.unwrap();
        let kept = store.insert_cart_item(new_cart_item("b@example.com")).await.unwrap();

        let receipt = store
            .record_payment(NewPayment {
                email: Email::parse("a@example.com").unwrap(),
                total_amount: Decimal::new(2900, 2),
                cart_item_ids: vec![a, b],
                menu_item_ids: vec![MenuItemId::new()],
            })
            .await
            .unwrap();

        assert_eq!(receipt.carts_deleted, 2);
        assert!(store.list_cart_items("a@example.com").await.unwrap().is_empty());
        assert_eq!(store.list_cart_items("b@example.com").await.unwrap().len(), 1);
        assert_eq!(store.list_cart_items("b@example.com").await.unwrap()[0].id, kept);
        assert_eq!(store.list_payments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_revenue_is_zero_with_no_payments() {
        let store = MemoryStore::new();
        assert_eq!(store.total_revenue().await.unwrap(), Decimal::ZERO);
    }
}
