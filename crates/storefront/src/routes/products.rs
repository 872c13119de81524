//! Product route handlers.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use solarspark_core::{
    Category, CategoryFilter, Product, ProductId, ProductQuery, SortOrder, Specification,
};
use tracing::instrument;

use crate::filters;
use crate::middleware::{PageChrome, ShopperCart};
use crate::state::AppState;

const MAX_STARS: u32 = 5;

/// Product card data for listings and the home page.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image: String,
    pub rating: String,
    pub stars: String,
    pub reviews: u32,
    pub bestseller: bool,
    pub is_new: bool,
    pub in_stock: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            category: product.category.label().to_string(),
            price: product.price.to_string(),
            image: product.image.clone(),
            rating: product.rating.to_string(),
            stars: star_string(product.full_stars()),
            reviews: product.reviews,
            bestseller: product.bestseller,
            is_new: product.is_new,
            in_stock: product.in_stock(),
        }
    }
}

/// Filled stars followed by empty ones, always five wide.
fn star_string(full: u32) -> String {
    let full = full.min(MAX_STARS);
    (0..MAX_STARS)
        .map(|i| if i < full { '★' } else { '☆' })
        .collect()
}

/// Product detail data for templates.
#[derive(Clone)]
pub struct ProductDetailView {
    pub card: ProductCardView,
    pub description: String,
    pub features: Vec<String>,
    pub specifications: Vec<Specification>,
    pub gallery: Vec<String>,
    pub stock: u32,
    pub in_cart: u32,
}

impl ProductDetailView {
    fn new(product: &Product, in_cart: u32) -> Self {
        Self {
            card: ProductCardView::from(product),
            description: product.description.clone(),
            features: product.features.clone(),
            specifications: product.specifications.clone(),
            gallery: product.gallery.clone(),
            stock: product.stock,
            in_cart,
        }
    }

    /// Label for the stock badge.
    #[must_use]
    pub fn stock_label(&self) -> String {
        if self.stock > 0 {
            format!("In Stock ({} available)", self.stock)
        } else {
            "Out of Stock".to_string()
        }
    }

    /// Whether another unit can still be added without passing stock.
    #[must_use]
    pub const fn can_add(&self) -> bool {
        self.in_cart < self.stock
    }
}

/// Category tab in the listing sidebar and home page.
#[derive(Clone)]
pub struct CategoryLink {
    pub slug: String,
    pub label: String,
    pub active: bool,
}

impl CategoryLink {
    #[must_use]
    pub fn new(slug: &str, label: &str, active: bool) -> Self {
        Self {
            slug: slug.to_string(),
            label: label.to_string(),
            active,
        }
    }
}

/// Sort option in the listing dropdown.
#[derive(Clone)]
pub struct SortOption {
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Listing query parameters.
///
/// Every field is a raw string so a malformed value falls back to its
/// default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub in_stock: Option<String>,
}

impl ListingQuery {
    /// Build the catalog query. `None` means the category slug was unknown.
    fn to_product_query(&self) -> Option<ProductQuery> {
        let category = CategoryFilter::from_param(self.category.as_deref()).ok()?;
        let defaults = ProductQuery::default();

        Some(ProductQuery {
            category,
            search: self
                .q
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(String::from),
            min_price: parse_price(self.min_price.as_deref()).unwrap_or(defaults.min_price),
            max_price: parse_price(self.max_price.as_deref()).unwrap_or(defaults.max_price),
            in_stock_only: is_checked(self.in_stock.as_deref()),
            sort: SortOrder::from_key(self.sort.as_deref()),
        })
    }
}

fn parse_price(raw: Option<&str>) -> Option<Decimal> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Decimal::from_str(s).ok())
        .filter(|d| !d.is_sign_negative())
}

fn is_checked(raw: Option<&str>) -> bool {
    matches!(
        raw.map(str::trim),
        Some("1" | "true" | "on" | "yes")
    )
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub chrome: PageChrome,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryLink>,
    pub sort_options: Vec<SortOption>,
    pub heading: String,
    pub search: String,
    pub min_price: String,
    pub max_price: String,
    pub in_stock_only: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub chrome: PageChrome,
    pub product: ProductDetailView,
}

/// Product not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub chrome: PageChrome,
}

/// Display product listing page.
#[instrument(skip(state, cart))]
pub async fn index(
    State(state): State<AppState>,
    cart: ShopperCart,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let product_query = query.to_product_query();
    let products: Vec<ProductCardView> = product_query
        .as_ref()
        .map(|q| {
            state
                .catalog()
                .query(q)
                .into_iter()
                .map(ProductCardView::from)
                .collect()
        })
        .unwrap_or_default();

    if product_query.is_none() {
        tracing::debug!(category = ?query.category, "Unknown category requested");
    }

    let active = product_query.as_ref().map(|q| q.category);
    let mut categories = vec![CategoryLink::new(
        "all",
        "All Products",
        active == Some(CategoryFilter::All),
    )];
    categories.extend(Category::ALL.into_iter().map(|category| {
        CategoryLink::new(
            category.slug(),
            category.label(),
            active == Some(CategoryFilter::Only(category)),
        )
    }));

    let heading = match active {
        Some(CategoryFilter::Only(category)) => category.label().to_string(),
        _ => "All Products".to_string(),
    };

    let sort = product_query.as_ref().map(|q| q.sort).unwrap_or_default();
    let sort_options = SortOrder::ALL
        .into_iter()
        .map(|order| SortOption {
            key: order.key(),
            label: order.label(),
            selected: order == sort,
        })
        .collect();

    let defaults = ProductQuery::default();
    let (min_price, max_price, in_stock_only) = product_query.as_ref().map_or(
        (defaults.min_price, defaults.max_price, false),
        |q| (q.min_price, q.max_price, q.in_stock_only),
    );

    ProductsIndexTemplate {
        chrome: cart.chrome().await,
        products,
        categories,
        sort_options,
        heading,
        search: query.q.clone().unwrap_or_default(),
        min_price: min_price.to_string(),
        max_price: max_price.to_string(),
        in_stock_only,
    }
}

/// Display product detail page.
#[instrument(skip(state, cart))]
pub async fn show(
    State(state): State<AppState>,
    cart: ShopperCart,
    Path(id): Path<String>,
) -> Response {
    let product = ProductId::from_str(&id)
        .ok()
        .and_then(|id| state.catalog().find_by_id(id));

    let Some(product) = product else {
        tracing::debug!(id = %id, "Product not found");
        return (
            StatusCode::NOT_FOUND,
            ProductNotFoundTemplate {
                chrome: cart.chrome().await,
            },
        )
            .into_response();
    };

    let in_cart = cart.store.quantity_of(product.id);

    ProductShowTemplate {
        chrome: cart.chrome().await,
        product: ProductDetailView::new(product, in_cart),
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(pairs: &[(&str, &str)]) -> ListingQuery {
        let mut query = ListingQuery::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "category" => query.category = value,
                "q" => query.q = value,
                "sort" => query.sort = value,
                "min_price" => query.min_price = value,
                "max_price" => query.max_price = value,
                "in_stock" => query.in_stock = value,
                _ => {}
            }
        }
        query
    }

    #[test]
    fn test_star_string() {
        assert_eq!(star_string(4), "★★★★☆");
        assert_eq!(star_string(0), "☆☆☆☆☆");
        assert_eq!(star_string(9), "★★★★★");
    }

    #[test]
    fn test_listing_query_defaults() {
        let query = listing(&[]).to_product_query();
        assert_eq!(query, Some(ProductQuery::default()));
    }

    #[test]
    fn test_listing_query_lenient_parsing() {
        let query = listing(&[
            ("category", "batteries"),
            ("q", "  tesla "),
            ("sort", "price-low-high"),
            ("min_price", "abc"),
            ("max_price", "5000"),
            ("in_stock", "on"),
        ])
        .to_product_query();

        let Some(query) = query else {
            panic!("batteries is a known category");
        };
        assert_eq!(query.category, CategoryFilter::Only(Category::Batteries));
        assert_eq!(query.search.as_deref(), Some("tesla"));
        assert_eq!(query.sort, SortOrder::PriceLowHigh);
        assert_eq!(query.min_price, Decimal::ZERO);
        assert_eq!(query.max_price, Decimal::from(5000));
        assert!(query.in_stock_only);
    }

    #[test]
    fn test_unknown_category_has_no_query() {
        assert!(listing(&[("category", "turbines")]).to_product_query().is_none());
    }

    #[test]
    fn test_stock_label_and_can_add() {
        let catalog = solarspark_core::Catalog::builtin();
        let Some(product) = catalog.find_by_id(ProductId::new(1)) else {
            panic!("product 1 is in the builtin catalog");
        };

        let view = ProductDetailView::new(product, 0);
        assert_eq!(view.stock_label(), format!("In Stock ({} available)", product.stock));
        assert!(view.can_add());

        let full = ProductDetailView::new(product, product.stock);
        assert!(!full.can_add());
    }
}
