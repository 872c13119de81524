//! The fixed product catalog.
//!
//! The catalog is loaded once at startup and never mutated. Lookups return
//! `None` or an empty list for misses; absence is not an error.

mod product;
mod query;

use std::collections::HashSet;

use rust_decimal::Decimal;
use thiserror::Error;

pub use product::{Product, Specification};
pub use query::{DEFAULT_MAX_PRICE, ProductQuery, SortOrder};

use crate::types::{CategoryFilter, ProductId};
use product::ProductRecord;

/// The bundled SolarSpark product list.
const BUILTIN_CATALOG: &str = include_str!("catalog.json");

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("product {0} has a rating outside 0-5")]
    RatingOutOfRange(ProductId),
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

/// Immutable list of products in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-validated products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if any product violates the catalog rules.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
            if product.price.amount.is_sign_negative() && !product.price.is_zero() {
                return Err(CatalogError::NegativePrice(product.id));
            }
            if product.rating < Decimal::ZERO || product.rating > Decimal::from(5) {
                return Err(CatalogError::RatingOutOfRange(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Parse and validate a catalog from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or a validation
    /// variant for a product that breaks the catalog rules.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        Self::new(records.into_iter().map(Product::from).collect())
    }

    /// The bundled SolarSpark catalog.
    ///
    /// The bundled file is covered by tests; a load failure is logged and
    /// yields an empty catalog rather than aborting the storefront.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Bundled catalog failed to load");
            Self::default()
        })
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in a category, or every product for [`CategoryFilter::All`].
    #[must_use]
    pub fn find_by_category(&self, filter: CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p.category))
            .collect()
    }

    /// Bestsellers and new arrivals, in catalog order.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_featured()).collect()
    }
}
