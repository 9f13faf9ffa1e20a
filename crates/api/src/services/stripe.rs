//! Stripe API client for payment intents.
//!
//! The gateway is an opaque external collaborator: given an amount in minor
//! currency units it returns a client-confirmable secret. Everything else
//! about the charge lifecycle happens on the client side against Stripe.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Stripe API base URL.
const BASE_URL: &str = "https://api.stripe.com/v1";

/// Currency every intent is created in.
const CURRENCY: &str = "usd";

/// Errors that can occur when interacting with the payment gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A created payment intent.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Gateway-side intent id.
    pub id: String,
    /// Secret the browser uses to confirm the charge.
    pub client_secret: String,
}

/// Interface to the payment gateway.
///
/// Injected as a trait object so the test suites can stub the gateway the
/// same way they scope the store.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an intent for `amount_minor` cents in the fixed currency.
    async fn create_intent(&self, amount_minor: i64) -> Result<PaymentIntent, GatewayError>;
}

/// Stripe-backed payment gateway client.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
}

impl StripeClient {
    /// Create a new Stripe API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(secret_key: &SecretString) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", secret_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| GatewayError::Parse(format!("Invalid secret key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_intent(&self, amount_minor: i64) -> Result<PaymentIntent, GatewayError> {
        let url = format!("{BASE_URL}/payment_intents");

        let amount = amount_minor.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", CURRENCY),
            ("payment_method_types[]", "card"),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<PaymentIntent>()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }
}
