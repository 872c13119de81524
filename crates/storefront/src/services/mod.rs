//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart_storage` - Session-backed storage slot for the cart store
//! - `checkout` - Simulated checkout with a fixed processing delay
//! - `notices` - One-shot notices carried across redirects

pub mod cart_storage;
pub mod checkout;
pub mod notices;

pub use cart_storage::SessionCartStorage;
pub use checkout::{CheckoutReceipt, CheckoutService};
