//! External-facing services: session tokens and the payment gateway.

pub mod stripe;
pub mod token;

pub use stripe::{GatewayError, PaymentGateway, PaymentIntent, StripeClient};
pub use token::{Claims, TokenError, TokenService};
