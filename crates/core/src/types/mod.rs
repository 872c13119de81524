//! Core types for SolarSpark.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;

pub use category::{Category, CategoryFilter, CategoryParseError};
pub use id::*;
pub use price::{CurrencyCode, Price};
