//! Session-backed cart storage.
//!
//! The shopper's session plays the role of durable browser storage: one slot,
//! keyed by [`session_keys::CART`], holding the JSON line array as a string.

use solarspark_core::{CartStorage, StorageError};
use tower_sessions::Session;

use crate::models::session_keys;

/// Cart storage slot inside a `tower-sessions` session.
#[derive(Clone)]
pub struct SessionCartStorage {
    session: Session,
}

impl SessionCartStorage {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartStorage for SessionCartStorage {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        self.session
            .get::<String>(session_keys::CART)
            .await
            .map_err(|e| StorageError::Read(e.to_string()))
    }

    async fn save(&self, value: String) -> Result<(), StorageError> {
        self.session
            .insert(session_keys::CART, value)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use solarspark_core::{CartNotice, CartStore, ProductId};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_store_writes_through_to_session() {
        let session = session();
        let mut store = CartStore::hydrate(SessionCartStorage::new(session.clone())).await;

        let notice = store.increase(ProductId::new(1)).await.unwrap();
        assert_eq!(notice, CartNotice::ItemAdded);

        let raw: Option<String> = session.get(session_keys::CART).await.unwrap();
        assert_eq!(raw.as_deref(), Some(r#"[{"id":1,"quantity":1}]"#));
    }

    #[tokio::test]
    async fn test_hydrate_reads_existing_session_value() {
        let session = session();
        session
            .insert(session_keys::CART, r#"[{"id":4,"quantity":3}]"#.to_string())
            .await
            .unwrap();

        let store = CartStore::hydrate(SessionCartStorage::new(session)).await;
        assert_eq!(store.quantity_of(ProductId::new(4)), 3);
    }

    #[tokio::test]
    async fn test_non_string_session_value_hydrates_empty() {
        let session = session();
        session.insert(session_keys::CART, 42).await.unwrap();

        let store = CartStore::hydrate(SessionCartStorage::new(session)).await;
        assert!(store.cart().is_empty());
    }
}
