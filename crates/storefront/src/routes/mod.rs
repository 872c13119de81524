//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (category, q, sort, price, in_stock)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (post/redirect/get)
//! GET  /cart                   - Cart page with order summary
//! POST /cart/add               - Add a quantity of a product
//! POST /cart/increase          - Increase a line by one
//! POST /cart/decrease          - Decrease a line by one (removes at zero)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart count badge (plain text)
//!
//! # Checkout
//! POST /checkout               - Simulated checkout, then back to home
//!
//! # API
//! GET  /api/cart               - Cart and totals as JSON
//! ```

pub mod api;
pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Simulated checkout
        .route("/checkout", post(cart::checkout))
        // JSON snapshot of the cart
        .route("/api/cart", get(api::cart))
}
