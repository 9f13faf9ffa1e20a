//! Bistro API library.
//!
//! This crate provides the ordering API as a library, allowing it to be
//! tested and reused. The binary in `main.rs` wires it to the network.
//!
//! # Layers
//!
//! - [`config`] - Environment configuration
//! - [`db`] - Persistence gateway (`Store` trait, Postgres + in-memory)
//! - [`models`] - Typed entities for the five collections
//! - [`middleware`] - Request guards (authenticate, authorize-admin, ownership)
//! - [`services`] - Token issuing/verification and the Stripe client
//! - [`reporting`] - Aggregation over payments and the menu
//! - [`routes`] - HTTP handlers and router assembly

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod reporting;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
