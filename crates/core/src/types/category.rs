//! Product categories and the listing filter built from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Panels,
    Batteries,
    Inverters,
    Accessories,
}

impl Category {
    /// Every category, in navigation order.
    pub const ALL: [Self; 4] = [
        Self::Panels,
        Self::Batteries,
        Self::Inverters,
        Self::Accessories,
    ];

    /// URL slug used in `?category=` parameters.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Panels => "panels",
            Self::Batteries => "batteries",
            Self::Inverters => "inverters",
            Self::Accessories => "accessories",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Panels => "Solar Panels",
            Self::Batteries => "Batteries",
            Self::Inverters => "Inverters",
            Self::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Unknown category slug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Category selection for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Only products in this category.
    Only(Category),
}

impl CategoryFilter {
    /// Parse an optional `category` query parameter.
    ///
    /// Missing, empty and `all` select every product.
    ///
    /// # Errors
    ///
    /// Returns `CategoryParseError` for a slug that names no category.
    pub fn from_param(param: Option<&str>) -> Result<Self, CategoryParseError> {
        match param.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(value) if value.eq_ignore_ascii_case("all") => Ok(Self::All),
            Some(value) => value.parse().map(Self::Only),
        }
    }

    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }

    /// Slug for round-tripping into links (`all` for every product).
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.slug(),
        }
    }
}
