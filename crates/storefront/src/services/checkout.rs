//! Simulated checkout.
//!
//! There is no payment provider. Checkout waits a fixed delay and then
//! clears the cart. The wait is part of the request future: if the client
//! goes away before the delay elapses, the future is dropped and the cart is
//! left as it was.

use std::time::Duration;

use solarspark_core::{
    Cart, CartNotice, CartStorage, CartStore, CartStoreError, Catalog, OrderSummary, Price,
};
use tracing::instrument;

/// What a completed checkout charged, captured before the cart was cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub item_count: u32,
    pub total: Price,
    pub notice: CartNotice,
}

/// Fixed-latency checkout.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutService {
    delay: Duration,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Process the order, then empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the emptied cart cannot be persisted. The
    /// cart keeps its lines in that case.
    #[instrument(skip_all, fields(delay = ?self.delay))]
    pub async fn complete<S: CartStorage>(
        &self,
        store: &mut CartStore<S>,
        catalog: &Catalog,
    ) -> Result<CheckoutReceipt, CartStoreError> {
        let (item_count, total) = totals(store.cart(), catalog);
        tracing::info!(item_count, total = %total, "Processing checkout");

        tokio::time::sleep(self.delay).await;

        let notice = store.clear().await?;
        tracing::info!(item_count, "Checkout complete, cart cleared");

        Ok(CheckoutReceipt {
            item_count,
            total,
            notice,
        })
    }
}

fn totals(cart: &Cart, catalog: &Catalog) -> (u32, Price) {
    let summary = OrderSummary::compute(cart, catalog);
    (summary.item_count, summary.total)
}
