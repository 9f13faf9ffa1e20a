//! Integration test harness for Bistro.
//!
//! Most tests here run against an in-memory [`TestContext`]: a fresh
//! `MemoryStore` and a stub payment gateway behind the real `AppState`, so
//! every test gets an isolated store and no test touches the network.
//!
//! A small set of smoke tests (`tests/live_api.rs`) instead drive a running
//! server over HTTP; those are `#[ignore]`d and require:
//!
//! ```bash
//! # Start the database and the API
//! bistro-cli init
//! cargo run -p bistro-api
//!
//! # Run the live tests
//! cargo test -p bistro-integration-tests -- --ignored
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::SecretString;

use bistro_api::config::ApiConfig;
use bistro_api::db::{MemoryStore, Store};
use bistro_api::models::{NewCartItem, NewMenuItem, NewUser};
use bistro_api::services::{Claims, GatewayError, PaymentGateway, PaymentIntent};
use bistro_api::state::AppState;
use bistro_core::{CartItemId, Email, MenuItemId, UserRole};

/// Payment gateway stub recording the last requested amount.
#[derive(Default)]
pub struct StubGateway {
    pub last_amount: Mutex<Option<i64>>,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_intent(&self, amount_minor: i64) -> Result<PaymentIntent, GatewayError> {
        *self.last_amount.lock().expect("stub lock poisoned") = Some(amount_minor);
        Ok(PaymentIntent {
            id: "pi_test".to_owned(),
            client_secret: "pi_test_secret_abc".to_owned(),
        })
    }
}

/// An isolated application state plus handles to its injected doubles.
pub struct TestContext {
    pub state: AppState,
    pub gateway: Arc<StubGateway>,
}

impl TestContext {
    /// Build a context over a fresh in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://localhost/unused"),
            host: "127.0.0.1".parse().expect("valid address"),
            port: 0,
            token_secret: SecretString::from("k9#mQ2$vX7!pL4@nR8%tZ1&wC5^bJ3*f"),
            stripe_secret_key: SecretString::from("sk_test_unused"),
            allowed_origin: None,
            sentry_dsn: None,
        };
        let gateway = Arc::new(StubGateway::default());
        let state = AppState::new(
            config,
            Arc::new(MemoryStore::new()),
            Arc::clone(&gateway) as Arc<dyn PaymentGateway>,
        );
        Self { state, gateway }
    }

    /// Register a user through the store.
    pub async fn register(&self, email: &str) {
        self.state
            .store()
            .insert_user(NewUser {
                email: Email::parse(email).expect("valid email"),
                name: "Test".to_owned(),
            })
            .await
            .expect("insert user");
    }

    /// Register a user and grant the admin role.
    pub async fn register_admin(&self, email: &str) {
        self.register(email).await;
        let user = self
            .state
            .store()
            .find_user_by_email(email)
            .await
            .expect("find user")
            .expect("user exists");
        self.state
            .store()
            .set_user_role(user.id, UserRole::Admin)
            .await
            .expect("set role");
    }

    /// Put a dish on the menu.
    pub async fn add_menu_item(&self, name: &str, category: &str, cents: i64) -> MenuItemId {
        self.state
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

    /// Add a cart line for `email` referencing `menu_item_id`.
    pub async fn add_cart_line(&self, email: &str, menu_item_id: MenuItemId, cents: i64) -> CartItemId {
        self.state
            .store()
            .insert_cart_item(NewCartItem {
                email: Email::parse(email).expect("valid email"),
                menu_item_id,
                name: "Line".to_owned(),
                image: String::new(),
                price: Decimal::new(cents, 2),
            })
            .await
            .expect("insert cart item")
    }

    /// Verified claims for `email`, as the authenticate guard would produce.
    #[must_use]
    pub fn claims_for(&self, email: &str) -> Claims {
        let token = self.state.tokens().issue(email).expect("issue token");
        self.state.tokens().verify(&token).expect("verify token")
    }

    /// A `Bearer` header value for `email`.
    #[must_use]
    pub fn bearer(&self, email: &str) -> String {
        let token = self.state.tokens().issue(email).expect("issue token");
        format!("Bearer {token}")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
