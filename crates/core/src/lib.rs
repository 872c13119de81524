//! SolarSpark Core - catalog, cart and checkout domain library.
//!
//! This crate provides the domain model used by the storefront:
//! - [`catalog`] - The fixed product set and its lookups
//! - [`cart`] - Cart lines, their invariants and the notices mutations emit
//! - [`store`] - The write-through cart store over a pluggable storage slot
//! - [`checkout`] - Order totals derived from a cart and the catalog
//!
//! # Architecture
//!
//! The core crate does no network or database I/O. Persistence is reached
//! only through the [`store::CartStorage`] trait, which the storefront
//! implements on top of the shopper's session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod store;
pub mod types;

pub use cart::{Cart, CartError, CartLine, CartNotice};
pub use catalog::{Catalog, CatalogError, Product, ProductQuery, SortOrder, Specification};
pub use checkout::{
    FLAT_SHIPPING, FREE_SHIPPING_THRESHOLD, OrderSnapshot, OrderSummary, SummaryLine, shipping_for,
};
pub use store::{
    CART_STORAGE_KEY, CartStorage, CartStore, CartStoreError, MemoryStorage, StorageError,
};
pub use types::*;
