//! HTTP route handlers for the ordering API.
//!
//! # Route Structure
//!
//! ```text
//! POST /jwt                      - Issue a session token
//!
//! # Menu (public reads, admin writes)
//! GET    /menu                   - Catalog listing
//! GET    /menu/{id}              - Single item (null if missing)
//! POST   /menu                   - Add item (admin)
//! PATCH  /menu/{id}              - Partial update (admin)
//! DELETE /menu/{id}              - Remove item (admin)
//!
//! # Reviews
//! GET    /reviews                - Testimonial listing
//!
//! # Users
//! GET    /users                  - User listing (admin)
//! POST   /users                  - Register (idempotent on email)
//! GET    /users/admin/{email}    - Admin-status probe (authenticated)
//! PATCH  /users/admin/{id}       - Grant admin role (admin)
//! DELETE /users/{id}             - Remove user (admin)
//!
//! # Carts
//! GET    /carts?email=           - Owner's cart lines
//! POST   /carts                  - Add line
//! DELETE /carts/{id}             - Remove line
//!
//! # Payments
//! GET    /payments/history/{email} - Own history (authenticated, owner only)
//! POST   /payments/intent          - Create gateway intent
//! POST   /payments                 - Record payment, clear paid cart lines
//!
//! # Reporting
//! GET    /stats/admin            - Counts + revenue (admin)
//! GET    /stats/orders           - Category sales grouping
//! ```

pub mod auth;
pub mod carts;
pub mod menu;
pub mod payments;
pub mod reviews;
pub mod stats;
pub mod users;

use axum::{Router, routing::post};
use serde::Serialize;

use crate::state::AppState;

/// Assemble the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(auth::issue_token))
        .nest("/menu", menu::routes())
        .nest("/reviews", reviews::routes())
        .nest("/users", users::routes())
        .nest("/carts", carts::routes())
        .nest("/payments", payments::routes())
        .nest("/stats", stats::routes())
}

/// Insert result: the new row's id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inserted<T> {
    pub inserted_id: T,
}

/// Update result: how many rows the id matched (0 or 1).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Updated {
    pub modified: u64,
}

/// Delete result: how many rows were removed (0 or 1).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub deleted: u64,
}
