//! Cart extractor.
//!
//! Hydrates the shopper's cart store from the session for every handler that
//! asks for it. The store is the only path that mutates the cart.

use axum::{extract::FromRequestParts, http::request::Parts};
use solarspark_core::CartStore;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::Notice;
use crate::services::{SessionCartStorage, notices};

/// The shopper's cart store plus the session it lives in.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut cart: ShopperCart) -> impl IntoResponse {
///     let notice = cart.store.increase(ProductId::new(1)).await?;
///     // ...
/// }
/// ```
pub struct ShopperCart {
    pub store: CartStore<SessionCartStorage>,
    pub session: Session,
}

/// Data every full page needs for its header and notice area.
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    pub cart_count: u32,
    pub notices: Vec<Notice>,
}

impl ShopperCart {
    /// Header badge count plus the queued notices, which are drained.
    pub async fn chrome(&self) -> PageChrome {
        PageChrome {
            cart_count: self.store.total_quantity(),
            notices: notices::take(&self.session).await,
        }
    }

    /// Queue a notice for the next page.
    pub async fn notify(&self, notice: impl Into<Notice>) {
        notices::push(&self.session, notice).await;
    }
}

impl<S> FromRequestParts<S> for ShopperCart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer not installed".to_string()))?;

        let store = CartStore::hydrate(SessionCartStorage::new(session.clone())).await;
        Ok(Self { store, session })
    }
}
