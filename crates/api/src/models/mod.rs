//! Domain models for the five collections.
//!
//! These are validated, typed entities; the persistence layer maps its row
//! types into them at the boundary. Wire names stay camelCase to match the
//! frontend contract.

pub mod cart;
pub mod menu;
pub mod payment;
pub mod review;
pub mod user;

pub use cart::{CartItem, NewCartItem};
pub use menu::{MenuItem, MenuItemPatch, NewMenuItem};
pub use payment::{NewPayment, Payment, PaymentReceipt};
pub use review::{NewReview, Review};
pub use user::{NewUser, User};
