use shopcart_core::{DomainError, DomainResult, Entity, ItemId, Price, UserId};
use shopcart_inventory::{Inventory, Item};

/// Entity: one user's cart of reservations not yet checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    owner: UserId,
    reservations: Vec<ItemId>,
    total_cost: Price,
}

impl Cart {
    pub fn new(owner: UserId) -> Self {
        Self {
            owner,
            reservations: Vec::new(),
            total_cost: Price::ZERO,
        }
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Reserved item ids, in reservation order.
    pub fn reservations(&self) -> &[ItemId] {
        &self.reservations
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Total as of the last `recompute_total`. May be stale.
    pub fn total_cost(&self) -> Price {
        self.total_cost
    }

    /// Number of reservations in this cart that point at the same catalog entry
    /// as `item`.
    pub fn reserved_count(&self, item: &Item) -> u64 {
        let id = item.id_typed();
        self.reservations.iter().filter(|r| **r == id).count() as u64
    }

    /// Append a reservation. Admission is decided by the checkout engine.
    pub fn push_reservation(&mut self, id: ItemId) {
        self.reservations.push(id);
    }

    /// Resolve every reservation against `inventory`, in order.
    pub fn resolve<'a>(&self, inventory: &'a Inventory) -> DomainResult<Vec<&'a Item>> {
        self.reservations
            .iter()
            .map(|id| {
                inventory.get(*id).ok_or_else(|| {
                    DomainError::invariant(format!(
                        "cart {} holds a reservation for unknown item {id}",
                        self.owner
                    ))
                })
            })
            .collect()
    }

    /// Set `total_cost` to the sum of the reserved items' *current* prices.
    ///
    /// Only an unresolvable reservation fails; a sum past [`Price::MAX`] is
    /// clamped.
    pub fn recompute_total(&mut self, inventory: &Inventory) -> DomainResult<Price> {
        let total = Price::total(self.resolve(inventory)?.into_iter().map(Item::price));
        self.total_cost = total;
        Ok(total)
    }

    /// Drop every reservation for `id`. Returns how many were dropped.
    pub fn remove_item(&mut self, id: ItemId) -> usize {
        let before = self.reservations.len();
        self.reservations.retain(|r| *r != id);
        before - self.reservations.len()
    }

    pub fn empty(&mut self) {
        self.reservations.clear();
        self.total_cost = Price::ZERO;
    }
}

impl Entity for Cart {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.owner
    }
}
