//! Write-through cart store.
//!
//! [`CartStore`] owns the shopper's [`Cart`] and is its only mutator. Every
//! mutation is applied to a copy, saved to the backing [`CartStorage`] slot,
//! and only then installed, so the in-memory cart never runs ahead of
//! storage. Hydration never fails: a missing, unreadable or malformed slot
//! yields an empty cart.

use std::future::Future;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::instrument;

use crate::cart::{Cart, CartNotice};
use crate::types::ProductId;

/// Fixed key of the cart's storage slot.
pub const CART_STORAGE_KEY: &str = "shopping-cart";

/// Failure of the backing storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Errors returned by cart store mutations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The updated cart could not be persisted; the cart is unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One durable string slot holding the serialized cart.
pub trait CartStorage {
    /// Read the slot. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Overwrite the slot.
    fn save(&self, value: String) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// In-process storage slot.
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// the store wrote. Failures can be injected for either direction.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    value: Option<String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with a raw value.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.with_slot(|slot| slot.value = Some(value.into()));
        storage
    }

    /// Current raw value of the slot.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.with_slot(|slot| slot.value.clone()).flatten()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.with_slot(|slot| slot.fail_reads = fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.with_slot(|slot| slot.fail_writes = fail);
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut MemorySlot) -> T) -> Option<T> {
        self.inner.lock().ok().map(|mut slot| f(&mut slot))
    }
}

impl CartStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        self.with_slot(|slot| {
            if slot.fail_reads {
                Err(StorageError::Read("injected read failure".to_string()))
            } else {
                Ok(slot.value.clone())
            }
        })
        .unwrap_or_else(|| Err(StorageError::Read("slot lock poisoned".to_string())))
    }

    async fn save(&self, value: String) -> Result<(), StorageError> {
        self.with_slot(|slot| {
            if slot.fail_writes {
                Err(StorageError::Write("injected write failure".to_string()))
            } else {
                slot.value = Some(value);
                Ok(())
            }
        })
        .unwrap_or_else(|| Err(StorageError::Write("slot lock poisoned".to_string())))
    }
}

/// The shopper's cart, backed by a storage slot.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the cart from `storage`, falling back to an empty cart.
    pub async fn hydrate(storage: S) -> Self {
        let cart = match storage.load().await {
            Ok(None) => Cart::new(),
            Ok(Some(raw)) => serde_json::from_str::<Cart>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding malformed stored cart");
                Cart::new()
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart, starting empty");
                Cart::new()
            }
        };
        Self { storage, cart }
    }

    /// The current cart.
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.cart.quantity_of(id)
    }

    pub fn total_quantity(&self) -> u32 {
        self.cart.total_quantity()
    }

    /// See [`Cart::increase`].
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the updated cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn increase(&mut self, id: ProductId) -> Result<CartNotice, CartStoreError> {
        let mut next = self.cart.clone();
        let notice = next.increase(id);
        self.commit(next).await?;
        Ok(notice)
    }

    /// See [`Cart::add`]. Adding zero units writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the updated cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add(
        &mut self,
        id: ProductId,
        quantity: u32,
    ) -> Result<Option<CartNotice>, CartStoreError> {
        self.apply(|cart| cart.add(id, quantity)).await
    }

    /// See [`Cart::decrease`]. An absent line writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the updated cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn decrease(&mut self, id: ProductId) -> Result<Option<CartNotice>, CartStoreError> {
        self.apply(|cart| cart.decrease(id)).await
    }

    /// See [`Cart::remove`]. An absent line writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the updated cart cannot be persisted.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove(&mut self, id: ProductId) -> Result<Option<CartNotice>, CartStoreError> {
        self.apply(|cart| cart.remove(id)).await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartStoreError` if the empty cart cannot be persisted.
    #[instrument(skip(self))]
    pub async fn clear(&mut self) -> Result<CartNotice, CartStoreError> {
        let mut next = self.cart.clone();
        let notice = next.clear();
        self.commit(next).await?;
        Ok(notice)
    }

    /// Run a mutation that may be a no-op; only a change is persisted.
    async fn apply(
        &mut self,
        mutate: impl FnOnce(&mut Cart) -> Option<CartNotice>,
    ) -> Result<Option<CartNotice>, CartStoreError> {
        let mut next = self.cart.clone();
        let Some(notice) = mutate(&mut next) else {
            return Ok(None);
        };
        self.commit(next).await?;
        Ok(Some(notice))
    }

    async fn commit(&mut self, next: Cart) -> Result<(), CartStoreError> {
        let raw = serde_json::to_string(&next)?;
        self.storage.save(raw).await?;
        tracing::debug!(lines = next.lines().len(), "Cart persisted");
        self.cart = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartLine;

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    fn stored(storage: &MemoryStorage) -> Cart {
        serde_json::from_str(&storage.value().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_hydrate_empty_when_missing() {
        let store = CartStore::hydrate(MemoryStorage::new()).await;
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_restores_lines() {
        let storage = MemoryStorage::with_value(r#"[{"id":3,"quantity":2},{"id":1,"quantity":1}]"#);
        let store = CartStore::hydrate(storage).await;
        assert_eq!(
            store.cart().lines(),
            &[
                CartLine { id: id(3), quantity: 2 },
                CartLine { id: id(1), quantity: 1 }
            ]
        );
        assert_eq!(store.total_quantity(), 3);
    }

    #[tokio::test]
    async fn test_hydrate_falls_back_on_corruption() {
        for raw in ["not json", r#"{"id":1}"#, r#"[{"id":1,"quantity":0}]"#] {
            let store = CartStore::hydrate(MemoryStorage::with_value(raw)).await;
            assert!(store.cart().is_empty(), "expected empty cart for {raw}");
        }
    }

    #[tokio::test]
    async fn test_hydrate_falls_back_on_read_failure() {
        let storage = MemoryStorage::with_value(r#"[{"id":1,"quantity":1}]"#);
        storage.set_fail_reads(true);
        let store = CartStore::hydrate(storage).await;
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_increase_scenario_with_notices() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::hydrate(storage.clone()).await;

        assert_eq!(store.increase(id(1)).await.unwrap(), CartNotice::ItemAdded);
        assert_eq!(storage.value().unwrap(), r#"[{"id":1,"quantity":1}]"#);

        assert_eq!(
            store.increase(id(1)).await.unwrap(),
            CartNotice::QuantityIncreased
        );
        assert_eq!(storage.value().unwrap(), r#"[{"id":1,"quantity":2}]"#);
    }

    #[tokio::test]
    async fn test_decrease_last_unit_scenario() {
        let storage = MemoryStorage::with_value(r#"[{"id":1,"quantity":1}]"#);
        let mut store = CartStore::hydrate(storage.clone()).await;

        assert_eq!(
            store.decrease(id(1)).await.unwrap(),
            Some(CartNotice::ItemRemoved)
        );
        assert!(store.cart().is_empty());
        assert_eq!(storage.value().unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_storage_matches_memory_after_every_mutation() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::hydrate(storage.clone()).await;

        store.increase(id(2)).await.unwrap();
        assert_eq!(&stored(&storage), store.cart());
        store.add(id(5), 3).await.unwrap();
        assert_eq!(&stored(&storage), store.cart());
        store.decrease(id(5)).await.unwrap();
        assert_eq!(&stored(&storage), store.cart());
        store.remove(id(2)).await.unwrap();
        assert_eq!(&stored(&storage), store.cart());
        store.clear().await.unwrap();
        assert_eq!(&stored(&storage), store.cart());
    }

    #[tokio::test]
    async fn test_absent_line_writes_nothing() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::hydrate(storage.clone()).await;

        assert_eq!(store.decrease(id(4)).await.unwrap(), None);
        assert_eq!(store.remove(id(4)).await.unwrap(), None);
        assert_eq!(store.add(id(4), 0).await.unwrap(), None);
        assert_eq!(storage.value(), None);
    }

    #[tokio::test]
    async fn test_write_failure_leaves_cart_unchanged() {
        let storage = MemoryStorage::with_value(r#"[{"id":1,"quantity":1}]"#);
        let mut store = CartStore::hydrate(storage.clone()).await;
        storage.set_fail_writes(true);

        let result = store.increase(id(1)).await;
        assert!(matches!(result, Err(CartStoreError::Storage(StorageError::Write(_)))));
        assert_eq!(store.quantity_of(id(1)), 1);
        assert!(store.clear().await.is_err());
        assert_eq!(store.total_quantity(), 1);
        assert_eq!(storage.value().unwrap(), r#"[{"id":1,"quantity":1}]"#);
    }

    #[tokio::test]
    async fn test_rehydrate_sees_previous_writes() {
        let storage = MemoryStorage::new();
        {
            let mut store = CartStore::hydrate(storage.clone()).await;
            store.increase(id(6)).await.unwrap();
            store.increase(id(3)).await.unwrap();
        }
        let store = CartStore::hydrate(storage).await;
        assert_eq!(store.quantity_of(id(6)), 1);
        assert_eq!(store.quantity_of(id(3)), 1);
    }
}
