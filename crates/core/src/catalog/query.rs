//! Product listing filters and sort orders.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::{Catalog, Product};
use crate::types::CategoryFilter;

/// Upper bound of the default price range.
pub const DEFAULT_MAX_PRICE: i64 = 10_000;

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Bestsellers first.
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
    /// New arrivals first.
    Newest,
    /// Highest rating first.
    Rating,
}

impl SortOrder {
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::PriceLowHigh,
        Self::PriceHighLow,
        Self::Newest,
        Self::Rating,
    ];

    /// Query-string key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
            Self::Newest => "newest",
            Self::Rating => "rating",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceLowHigh => "Price: Low to High",
            Self::PriceHighLow => "Price: High to Low",
            Self::Newest => "Newest",
            Self::Rating => "Top Rated",
        }
    }

    /// Parse a query-string key, falling back to [`SortOrder::Featured`].
    #[must_use]
    pub fn from_key(key: Option<&str>) -> Self {
        key.and_then(|k| k.parse().ok()).unwrap_or_default()
    }

    fn sort(self, products: &mut [&Product]) {
        // `sort_by` is stable, so ties keep catalog order.
        match self {
            Self::Featured => products.sort_by_key(|p| !p.bestseller),
            Self::PriceLowHigh => products.sort_by(|a, b| a.price.amount.cmp(&b.price.amount)),
            Self::PriceHighLow => products.sort_by(|a, b| b.price.amount.cmp(&a.price.amount)),
            Self::Newest => products.sort_by_key(|p| !p.is_new),
            Self::Rating => products.sort_by(|a, b| b.rating.cmp(&a.rating)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|order| order.key() == s).ok_or(())
    }
}

/// Filters applied to the product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub category: CategoryFilter,
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub in_stock_only: bool,
    pub sort: SortOrder,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            search: None,
            min_price: Decimal::ZERO,
            max_price: Decimal::from(DEFAULT_MAX_PRICE),
            in_stock_only: false,
            sort: SortOrder::Featured,
        }
    }
}

impl ProductQuery {
    fn matches(&self, product: &Product, needle: Option<&str>) -> bool {
        if !self.category.matches(product.category) {
            return false;
        }
        if let Some(needle) = needle {
            let hit = product.name.to_lowercase().contains(needle)
                || product.description.to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }
        if self.in_stock_only && !product.in_stock() {
            return false;
        }
        (self.min_price..=self.max_price).contains(&product.price.amount)
    }
}

impl Catalog {
    /// Run a listing query. The result borrows from the catalog.
    #[must_use]
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut products: Vec<&Product> = self
            .products()
            .iter()
            .filter(|p| query.matches(p, needle.as_deref()))
            .collect();
        query.sort.sort(&mut products);
        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, ProductId};

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_default_query_sorts_bestsellers_first() {
        let catalog = Catalog::builtin();
        let result = catalog.query(&ProductQuery::default());
        assert_eq!(ids(&result), vec![1, 3, 6, 2, 4, 5]);
    }

    #[test]
    fn test_category_and_price_sort() {
        let catalog = Catalog::builtin();
        let query = ProductQuery {
            category: CategoryFilter::Only(Category::Panels),
            sort: SortOrder::PriceLowHigh,
            ..ProductQuery::default()
        };
        assert_eq!(ids(&catalog.query(&query)), vec![2, 1]);
    }

    #[test]
    fn test_search_matches_description_case_insensitively() {
        let catalog = Catalog::builtin();
        let query = ProductQuery {
            search: Some("  RVs ".to_string()),
            ..ProductQuery::default()
        };
        let result = catalog.query(&query);
        assert_eq!(result.len(), 1);
        assert_eq!(result.first().map(|p| p.id), Some(ProductId::new(2)));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = Catalog::builtin();
        let query = ProductQuery {
            min_price: Decimal::from(599),
            max_price: Decimal::from(1499),
            sort: SortOrder::PriceHighLow,
            ..ProductQuery::default()
        };
        assert_eq!(ids(&catalog.query(&query)), vec![5, 1, 2]);
    }

    #[test]
    fn test_newest_and_rating_orders() {
        let catalog = Catalog::builtin();
        let newest = ProductQuery {
            sort: SortOrder::Newest,
            ..ProductQuery::default()
        };
        assert_eq!(ids(&catalog.query(&newest)), vec![2, 4, 1, 3, 5, 6]);

        let rating = ProductQuery {
            sort: SortOrder::Rating,
            ..ProductQuery::default()
        };
        assert_eq!(ids(&catalog.query(&rating)), vec![3, 1, 5, 4, 2, 6]);
    }

    #[test]
    fn test_sort_order_from_key_falls_back_to_featured() {
        assert_eq!(SortOrder::from_key(Some("rating")), SortOrder::Rating);
        assert_eq!(SortOrder::from_key(Some("cheapest")), SortOrder::Featured);
        assert_eq!(SortOrder::from_key(None), SortOrder::Featured);
    }
}
