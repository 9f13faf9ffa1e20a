//! Shared fixtures for the in-crate test suites.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::SecretString;

use bistro_core::{Email, MenuItemId, UserRole};

use crate::config::ApiConfig;
use crate::db::{MemoryStore, Store};
use crate::models::{NewMenuItem, NewUser};
use crate::services::{GatewayError, PaymentGateway, PaymentIntent};
use crate::state::AppState;

/// Payment gateway stub that records the amount it was asked to charge.
#[derive(Default)]
pub struct StubGateway {
    pub last_amount: Mutex<Option<i64>>,
    pub fail: bool,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_intent(&self, amount_minor: i64) -> Result<PaymentIntent, GatewayError> {
        *self.last_amount.lock().expect("stub lock poisoned") = Some(amount_minor);
        if self.fail {
            return Err(GatewayError::Api {
                status: 500,
                message: "stubbed outage".to_owned(),
            });
        }
        Ok(PaymentIntent {
            id: "pi_test".to_owned(),
            client_secret: "pi_test_secret_abc".to_owned(),
        })
    }
}

/// Config with harmless values; nothing here reaches the network.
pub fn test_config() -> ApiConfig {
    ApiConfig {
        database_url: SecretString::from("postgres://localhost/unused"),
        host: "127.0.0.1".parse().expect("valid address"),
        port: 0,
        token_secret: SecretString::from("k9#mQ2$vX7!pL4@nR8%tZ1&wC5^bJ3*f"),
        stripe_secret_key: SecretString::from("sk_test_unused"),
        allowed_origin: None,
        sentry_dsn: None,
    }
}

/// App state over a fresh in-memory store and the given gateway.
pub fn state_with(store: Arc<MemoryStore>, gateway: Arc<StubGateway>) -> AppState {
    AppState::new(test_config(), store, gateway)
}

/// App state over a fresh in-memory store and a succeeding stub gateway.
pub fn test_state() -> AppState {
    state_with(Arc::new(MemoryStore::new()), Arc::new(StubGateway::default()))
}

/// Register a user and return nothing; panics on store errors.
pub async fn register(state: &AppState, email: &str) {
    state
        .store()
        .insert_user(NewUser {
            email: Email::parse(email).expect("valid email"),
            name: "Test".to_owned(),
        })
        .await
        .expect("insert user");
}

/// Grant the admin role to an existing user.
pub async fn promote(state: &AppState, email: &str) {
    let user = state
        .store()
        .find_user_by_email(email)
        .await
        .expect("find user")
        .expect("user exists");
    state
        .store()
        .set_user_role(user.id, UserRole::Admin)
        .await
        .expect("set role");
}

/// Put a dish on the menu and return its id.
pub async fn add_menu_item(state: &AppState, name: &str, category: &str, cents: i64) -> MenuItemId {
    state
        .store()
        .insert_menu_item(NewMenuItem {
            name: name.to_owned(),
            category: category.to_owned(),
            price: Decimal::new(cents, 2),
            recipe: String::new(),
            image: String::new(),
        })
        .await
        .expect("insert menu item")
}
