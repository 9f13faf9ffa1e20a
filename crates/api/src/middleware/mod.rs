//! Request guards.
//!
//! # Guard Order
//!
//! 1. [`Identity`] - authenticate: Bearer token → verified claims
//! 2. [`RequireAdmin`] - authorize: claims → user record with admin role
//! 3. [`require_owner`] - route-specific ownership check
//!
//! `RequireAdmin` is built *on top of* `Identity`, so running authorization
//! without authentication is unrepresentable rather than merely discouraged.

pub mod auth;

pub use auth::{Identity, RequireAdmin, require_owner};
