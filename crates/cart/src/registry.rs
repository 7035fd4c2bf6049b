use std::collections::HashMap;

use shopcart_core::{DomainError, DomainResult, ItemId, UserId};
use tracing::debug;

use crate::cart::Cart;

/// Lazily populated mapping from user to cart. Entries never expire.
#[derive(Debug, Clone, Default)]
pub struct CartRegistry {
    carts: HashMap<UserId, Cart>,
}

impl CartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    /// Return the user's cart, creating an empty one on first reference.
    pub fn get_or_create(&mut self, user: &UserId) -> &mut Cart {
        self.carts.entry(user.clone()).or_insert_with(|| {
            debug!(user = %user, "cart created");
            Cart::new(user.clone())
        })
    }

    /// Look up a cart where absence is the caller's error.
    pub fn get(&self, user: &UserId) -> DomainResult<&Cart> {
        self.carts
            .get(user)
            .ok_or_else(|| DomainError::cart_not_found(user.as_str()))
    }

    pub fn get_mut(&mut self, user: &UserId) -> DomainResult<&mut Cart> {
        self.carts
            .get_mut(user)
            .ok_or_else(|| DomainError::cart_not_found(user.as_str()))
    }

    /// Registered users, sorted.
    pub fn users(&self) -> Vec<&UserId> {
        let mut users: Vec<&UserId> = self.carts.keys().collect();
        users.sort();
        users
    }

    /// Drop reservations of `id` from every cart. Returns the number dropped.
    pub fn purge_item(&mut self, id: ItemId) -> usize {
        self.carts.values_mut().map(|cart| cart.remove_item(id)).sum()
    }
}
