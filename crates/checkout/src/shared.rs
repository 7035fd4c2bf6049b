//! Thread-safe handle over a [`Store`].

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use shopcart_core::{DomainResult, UserId};
use shopcart_inventory::{Item, ItemDraft, StockFilter};

use crate::store::{CartView, CheckoutReceipt, ReserveOutcome, Store};

/// Cloneable handle that runs every store operation under one lock.
///
/// Reserve and checkout read and write stock across several steps, so each
/// operation holds the write lock for its whole duration. Plain catalog reads
/// share the read lock.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // Operations validate before they mutate, so a poisoned lock still guards
    // consistent state.
    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.inner.read().unwrap_or_else(|poisoned| {
            warn!("store lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.inner.write().unwrap_or_else(|poisoned| {
            warn!("store lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    pub fn list_items(&self, filter: StockFilter) -> Vec<Item> {
        self.read().list_items(filter).into_iter().cloned().collect()
    }

    pub fn find_item(&self, title: &str) -> DomainResult<Item> {
        self.read().find_item(title).cloned()
    }

    /// Add an item and return the full catalog afterwards.
    pub fn add_item(&self, draft: ItemDraft) -> DomainResult<Vec<Item>> {
        let mut store = self.write();
        store.add_item(draft)?;
        Ok(store.list_items(StockFilter::All).into_iter().cloned().collect())
    }

    pub fn update_item(&self, title: &str, draft: ItemDraft) -> DomainResult<Item> {
        self.write().update_item(title, draft).cloned()
    }

    pub fn remove_item(&self, title: &str) -> DomainResult<Item> {
        self.write().remove_item(title)
    }

    pub fn create_cart(&self, user: &UserId) -> DomainResult<CartView> {
        self.write().create_cart(user)
    }

    pub fn cart_view(&self, user: &UserId) -> DomainResult<CartView> {
        self.write().cart_view(user)
    }

    pub fn reserve(&self, user: &UserId, title: &str) -> DomainResult<ReserveOutcome> {
        self.write().reserve(user, title)
    }

    pub fn checkout(&self, user: &UserId) -> DomainResult<CheckoutReceipt> {
        self.write().checkout(user)
    }
}
