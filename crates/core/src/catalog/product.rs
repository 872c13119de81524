//! Product records.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use crate::types::{Category, Price, ProductId};

/// A catalog product. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: Price,
    pub description: String,
    pub features: Vec<String>,
    pub specifications: Vec<Specification>,
    pub image: String,
    pub gallery: Vec<String>,
    /// Average review score, 0 to 5.
    pub rating: Decimal,
    pub reviews: u32,
    /// Advisory stock level. Cart operations never decrement it.
    pub stock: u32,
    pub bestseller: bool,
    pub is_new: bool,
}

/// One row of a product's specification table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specification {
    pub name: String,
    pub value: String,
}

impl Product {
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Bestsellers and new arrivals are featured on the home page.
    #[must_use]
    pub const fn is_featured(&self) -> bool {
        self.bestseller || self.is_new
    }

    /// Whole-star rating for rendering, rounded down.
    #[must_use]
    pub fn full_stars(&self) -> u32 {
        self.rating.trunc().to_u32().unwrap_or(0)
    }
}

/// Serialized product shape in catalog files.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductRecord {
    pub id: i32,
    pub name: String,
    pub category: Category,
    pub price: Decimal,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub specifications: Vec<(String, String)>,
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub rating: Decimal,
    #[serde(default)]
    pub reviews: u32,
    pub stock: u32,
    #[serde(default)]
    pub bestseller: bool,
    #[serde(default, rename = "new")]
    pub is_new: bool,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: ProductId::new(record.id),
            name: record.name,
            category: record.category,
            price: Price::new(record.price, crate::types::CurrencyCode::default()),
            description: record.description,
            features: record.features,
            specifications: record
                .specifications
                .into_iter()
                .map(|(name, value)| Specification { name, value })
                .collect(),
            image: record.image,
            gallery: record.gallery,
            rating: record.rating,
            reviews: record.reviews,
            stock: record.stock,
            bestseller: record.bestseller,
            is_new: record.is_new,
        }
    }
}
