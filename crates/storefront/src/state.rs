//! Application state shared across handlers.

use std::sync::Arc;

use solarspark_core::Catalog;

use crate::config::StorefrontConfig;
use crate::services::CheckoutService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds the read-only
/// catalog; each shopper's cart lives in their session, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    checkout: CheckoutService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let checkout = CheckoutService::new(config.checkout_delay);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                checkout,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the simulated checkout service.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }
}
