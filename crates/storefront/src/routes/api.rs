//! JSON API handlers.

use axum::{Json, extract::State};
use solarspark_core::{OrderSnapshot, OrderSummary};
use tracing::instrument;

use crate::middleware::ShopperCart;
use crate::state::AppState;

/// Current cart with derived totals.
#[instrument(skip(state, cart))]
pub async fn cart(State(state): State<AppState>, cart: ShopperCart) -> Json<OrderSnapshot> {
    Json(OrderSummary::compute(cart.store.cart(), state.catalog()).snapshot())
}
