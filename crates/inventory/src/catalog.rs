//! Ordered, title-unique product catalog.

use std::collections::HashMap;

use shopcart_core::{DomainError, DomainResult, ItemId, ItemKey};
use tracing::debug;

use crate::item::{Item, ItemDraft};

/// Which catalog entries `Inventory::list` should return.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    /// Excludes items whose stock is zero.
    AvailableOnly,
}

/// The catalog: owns every `Item` and its stock level.
///
/// Items are stored in an arena keyed by `ItemId`; `order` keeps insertion
/// order for listing and `keys` maps case-folded titles to ids.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: HashMap<ItemId, Item>,
    order: Vec<ItemId>,
    keys: HashMap<ItemKey, ItemId>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Case-insensitive exact match on title.
    pub fn find(&self, title: &str) -> DomainResult<&Item> {
        self.find_id(title)
            .and_then(|id| self.items.get(&id))
            .ok_or_else(|| DomainError::item_not_found(title))
    }

    pub fn find_id(&self, title: &str) -> Option<ItemId> {
        self.keys.get(&ItemKey::from_title(title)).copied()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Append a new item. Fails with `DuplicateItem` rather than overwriting an
    /// existing entry's stock.
    pub fn add(&mut self, draft: ItemDraft) -> DomainResult<&Item> {
        self.add_with_id(ItemId::new(), draft)
    }

    pub fn add_with_id(&mut self, id: ItemId, draft: ItemDraft) -> DomainResult<&Item> {
        draft.validate()?;
        let key = draft.key();
        if self.keys.contains_key(&key) {
            return Err(DomainError::duplicate_item(draft.title));
        }
        if self.items.contains_key(&id) {
            return Err(DomainError::invariant(format!("item id {id} already in use")));
        }

        let item = Item::new(id, draft.title, draft.price, draft.stock)?;
        debug!(item_id = %id, title = item.title(), "catalog item added");
        self.keys.insert(key, id);
        self.order.push(id);
        Ok(&*self.items.entry(id).or_insert(item))
    }

    /// Overwrite title, price and stock of the item matching `title`.
    ///
    /// Renames keep the item's id and list position; callers must look the
    /// item up by its new title afterwards.
    pub fn update(&mut self, title: &str, draft: ItemDraft) -> DomainResult<&Item> {
        draft.validate()?;
        let id = self
            .find_id(title)
            .ok_or_else(|| DomainError::item_not_found(title))?;

        let old_key = ItemKey::from_title(title);
        let new_key = draft.key();
        if new_key != old_key && self.keys.contains_key(&new_key) {
            return Err(DomainError::duplicate_item(draft.title));
        }

        let item = self
            .items
            .get_mut(&id)
            .ok_or_else(|| DomainError::invariant(format!("dangling key for item {id}")))?;
        item.overwrite(draft);

        if new_key != old_key {
            self.keys.remove(&old_key);
            self.keys.insert(new_key, id);
        }
        debug!(item_id = %id, title = item.title(), "catalog item updated");
        Ok(&*item)
    }

    pub fn remove(&mut self, title: &str) -> DomainResult<Item> {
        let key = ItemKey::from_title(title);
        let id = self
            .keys
            .remove(&key)
            .ok_or_else(|| DomainError::item_not_found(title))?;
        self.order.retain(|existing| *existing != id);
        let item = self
            .items
            .remove(&id)
            .ok_or_else(|| DomainError::invariant(format!("dangling key for item {id}")))?;
        debug!(item_id = %id, title = item.title(), "catalog item removed");
        Ok(item)
    }

    /// Items in insertion order, optionally excluding out-of-stock entries.
    pub fn list(&self, filter: StockFilter) -> Vec<&Item> {
        self.iter()
            .filter(|item| match filter {
                StockFilter::All => true,
                StockFilter::AvailableOnly => item.is_available(),
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Commit one unit of stock for `id`.
    ///
    /// Returns `Some(true)` if a unit was taken, `Some(false)` if the item is
    /// out of stock and `None` if the id is unknown. Only checkout calls this.
    pub fn take_one(&mut self, id: ItemId) -> Option<bool> {
        self.items.get_mut(&id).map(Item::take_one)
    }
}
