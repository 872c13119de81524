//! Cart route handlers.
//!
//! Every mutation is a plain form post that redirects back to the page it
//! came from. The notice a mutation produces is flashed into the session and
//! rendered by that page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use solarspark_core::{CartNotice, CartStoreError, OrderSummary, Product, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{PageChrome, ShopperCart};
use crate::models::Notice;
use crate::state::AppState;

/// Where a cart form returns to when it names no page.
const DEFAULT_RETURN: &str = "/cart";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    pub available: bool,
    pub at_stock_limit: bool,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub free_shipping_remaining: Option<String>,
    pub has_unavailable: bool,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&OrderSummary<'_>> for CartView {
    fn from(summary: &OrderSummary<'_>) -> Self {
        let items = summary
            .lines
            .iter()
            .map(|line| {
                let id = line.line.id;
                line.product.map_or_else(
                    || CartItemView {
                        id: id.as_i32(),
                        name: format!("Unavailable product #{id}"),
                        image: None,
                        unit_price: "-".to_string(),
                        quantity: line.line.quantity,
                        line_total: line.line_total.to_string(),
                        available: false,
                        at_stock_limit: true,
                    },
                    |product| CartItemView {
                        id: id.as_i32(),
                        name: product.name.clone(),
                        image: Some(product.image.clone()),
                        unit_price: product.price.to_string(),
                        quantity: line.line.quantity,
                        line_total: line.line_total.to_string(),
                        available: true,
                        at_stock_limit: line.line.quantity >= product.stock,
                    },
                )
            })
            .collect();

        let shipping = if summary.has_free_shipping() {
            "Free".to_string()
        } else {
            summary.shipping.to_string()
        };

        Self {
            items,
            item_count: summary.item_count,
            subtotal: summary.subtotal.to_string(),
            shipping,
            total: summary.total.to_string(),
            free_shipping_remaining: summary.free_shipping_remaining().map(|p| p.to_string()),
            has_unavailable: summary.has_unavailable(),
        }
    }
}

/// Cart mutation form data.
#[derive(Debug, Deserialize)]
pub struct CartForm {
    pub product_id: String,
    pub quantity: Option<String>,
    pub return_to: Option<String>,
}

impl CartForm {
    fn product_id(&self) -> Result<ProductId> {
        self.product_id
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid product id: {}", self.product_id)))
    }

    /// Requested quantity; missing or malformed means one.
    fn quantity(&self) -> u32 {
        self.quantity
            .as_deref()
            .and_then(|q| q.trim().parse().ok())
            .unwrap_or(1)
    }

    fn redirect(&self) -> Redirect {
        return_redirect(self.return_to.as_deref())
    }
}

/// Clear cart form data.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    pub return_to: Option<String>,
}

/// Redirect to `return_to` when it is a local path, else to the cart.
fn return_redirect(return_to: Option<&str>) -> Redirect {
    Redirect::to(safe_return_path(return_to))
}

fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => DEFAULT_RETURN,
    }
}

/// Notice to show when `requested` more units would pass the stock level.
fn stock_limit(product: &Product, in_cart: u32, requested: u32) -> Option<Notice> {
    if in_cart.saturating_add(requested) <= product.stock {
        return None;
    }
    Some(Notice::warning(
        "Maximum quantity reached",
        format!("Sorry, we only have {} units in stock.", product.stock),
    ))
}

fn unavailable_notice(id: ProductId) -> Notice {
    Notice::warning(
        "Product unavailable",
        format!("Product #{id} is no longer available."),
    )
}

/// Flash the outcome of a store mutation.
async fn settle(cart: &ShopperCart, outcome: std::result::Result<Option<CartNotice>, CartStoreError>) {
    match outcome {
        Ok(Some(notice)) => cart.notify(notice).await,
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "Failed to save cart");
            cart.notify(Notice::error(
                "Cart not saved",
                "We couldn't update your cart. Please try again.",
            ))
            .await;
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub chrome: PageChrome,
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(state, cart))]
pub async fn show(State(state): State<AppState>, cart: ShopperCart) -> impl IntoResponse {
    let summary = OrderSummary::compute(cart.store.cart(), state.catalog());
    if summary.has_unavailable() {
        tracing::warn!("Cart holds products missing from the catalog");
    }

    CartShowTemplate {
        chrome: cart.chrome().await,
        cart: CartView::from(&summary),
    }
}

/// Add a quantity of a product.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: ShopperCart,
    Form(form): Form<CartForm>,
) -> Result<Redirect> {
    let id = form.product_id()?;
    let quantity = form.quantity();

    let Some(product) = state.catalog().find_by_id(id) else {
        cart.notify(unavailable_notice(id)).await;
        return Ok(form.redirect());
    };
    if let Some(notice) = stock_limit(product, cart.store.quantity_of(id), quantity) {
        cart.notify(notice).await;
        return Ok(form.redirect());
    }

    let outcome = cart.store.add(id, quantity).await;
    settle(&cart, outcome).await;
    Ok(form.redirect())
}

/// Increase a line by one.
#[instrument(skip(state, cart))]
pub async fn increase(
    State(state): State<AppState>,
    mut cart: ShopperCart,
    Form(form): Form<CartForm>,
) -> Result<Redirect> {
    let id = form.product_id()?;

    let Some(product) = state.catalog().find_by_id(id) else {
        cart.notify(unavailable_notice(id)).await;
        return Ok(form.redirect());
    };
    if let Some(notice) = stock_limit(product, cart.store.quantity_of(id), 1) {
        cart.notify(notice).await;
        return Ok(form.redirect());
    }

    let outcome = cart.store.increase(id).await.map(Some);
    settle(&cart, outcome).await;
    Ok(form.redirect())
}

/// Decrease a line by one. Unknown lines are ignored.
#[instrument(skip(cart))]
pub async fn decrease(mut cart: ShopperCart, Form(form): Form<CartForm>) -> Result<Redirect> {
    let id = form.product_id()?;
    let outcome = cart.store.decrease(id).await;
    settle(&cart, outcome).await;
    Ok(form.redirect())
}

/// Remove a line. Unknown lines are ignored.
#[instrument(skip(cart))]
pub async fn remove(mut cart: ShopperCart, Form(form): Form<CartForm>) -> Result<Redirect> {
    let id = form.product_id()?;
    let outcome = cart.store.remove(id).await;
    settle(&cart, outcome).await;
    Ok(form.redirect())
}

/// Empty the cart.
#[instrument(skip(cart))]
pub async fn clear(mut cart: ShopperCart, Form(form): Form<ReturnForm>) -> Redirect {
    let outcome = cart.store.clear().await.map(Some);
    settle(&cart, outcome).await;
    return_redirect(form.return_to.as_deref())
}

/// Cart count badge (plain text).
#[instrument(skip(cart))]
pub async fn count(cart: ShopperCart) -> String {
    cart.store.total_quantity().to_string()
}

/// Simulated checkout.
///
/// An empty cart goes back to the cart page. Otherwise the request waits out
/// the checkout delay, clears the cart and lands on the home page.
#[instrument(skip(state, cart))]
pub async fn checkout(State(state): State<AppState>, mut cart: ShopperCart) -> Redirect {
    if cart.store.cart().is_empty() {
        return Redirect::to(DEFAULT_RETURN);
    }

    match state.checkout().complete(&mut cart.store, state.catalog()).await {
        Ok(receipt) => {
            tracing::info!(
                item_count = receipt.item_count,
                total = %receipt.total,
                "Order placed"
            );
            cart.notify(receipt.notice).await;
            Redirect::to("/")
        }
        Err(e) => {
            tracing::error!(error = %e, "Checkout failed");
            cart.notify(Notice::error(
                "Checkout failed",
                "Your cart was not changed. Please try again.",
            ))
            .await;
            Redirect::to(DEFAULT_RETURN)
        }
    }
}
