use chrono::{DateTime, Utc};
use tracing::{debug, info};

use shopcart_cart::{Cart, CartRegistry};
use shopcart_core::{DomainError, DomainResult, ItemId, Price, UserId};
use shopcart_inventory::{Inventory, Item, ItemDraft, StockFilter};

/// Result of a reservation attempt.
///
/// `Rejected` is an ordinary outcome, not an error: the cart already holds as
/// many units as the item has in stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveOutcome {
    Admitted { title: String, held: u64 },
    Rejected { title: String, held: u64 },
}

impl ReserveOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, ReserveOutcome::Admitted { .. })
    }

    pub fn title(&self) -> &str {
        match self {
            ReserveOutcome::Admitted { title, .. } | ReserveOutcome::Rejected { title, .. } => title,
        }
    }

    /// Units of this item the cart holds after the attempt.
    pub fn held(&self) -> u64 {
        match self {
            ReserveOutcome::Admitted { held, .. } | ReserveOutcome::Rejected { held, .. } => *held,
        }
    }
}

/// Read model of a cart with its total freshly recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub owner: UserId,
    pub items: Vec<Item>,
    pub total_cost: Price,
}

/// Outcome of a checkout, partitioned in reservation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub owner: UserId,
    pub purchased: Vec<Item>,
    pub rejected: Vec<Item>,
    /// Cart total taken before any stock was committed, clamped at
    /// [`Price::MAX`].
    pub total_cost: Price,
    pub completed_at: DateTime<Utc>,
}

impl CheckoutReceipt {
    pub fn is_empty(&self) -> bool {
        self.purchased.is_empty() && self.rejected.is_empty()
    }
}

/// Owner of all mutable state: the catalog and every cart.
///
/// Each method runs to completion without interleaving; wrap the store in a
/// [`crate::SharedStore`] to call it from several threads.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inventory: Inventory,
    carts: CartRegistry,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(inventory: Inventory, carts: CartRegistry) -> Self {
        Self { inventory, carts }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn carts(&self) -> &CartRegistry {
        &self.carts
    }

    // -------------------------
    // Catalog
    // -------------------------

    pub fn list_items(&self, filter: StockFilter) -> Vec<&Item> {
        self.inventory.list(filter)
    }

    pub fn find_item(&self, title: &str) -> DomainResult<&Item> {
        self.inventory.find(title)
    }

    pub fn add_item(&mut self, draft: ItemDraft) -> DomainResult<&Item> {
        let item = self.inventory.add(draft)?;
        info!(item_id = %item.id_typed(), title = item.title(), stock = item.stock(), "item added");
        Ok(item)
    }

    /// Update an item in place. Reservations follow a renamed item because
    /// they reference its id, not its title.
    pub fn update_item(&mut self, title: &str, draft: ItemDraft) -> DomainResult<&Item> {
        let item = self.inventory.update(title, draft)?;
        info!(item_id = %item.id_typed(), title = item.title(), stock = item.stock(), "item updated");
        Ok(item)
    }

    /// Remove an item and every outstanding reservation of it.
    pub fn remove_item(&mut self, title: &str) -> DomainResult<Item> {
        let item = self.inventory.remove(title)?;
        let purged = self.carts.purge_item(item.id_typed());
        info!(item_id = %item.id_typed(), title = item.title(), purged, "item removed");
        Ok(item)
    }

    // -------------------------
    // Carts
    // -------------------------

    /// Get or create the user's cart and report it.
    pub fn create_cart(&mut self, user: &UserId) -> DomainResult<CartView> {
        let cart = self.carts.get_or_create(user);
        view(cart, &self.inventory)
    }

    /// Report a cart with its total recomputed from current prices.
    pub fn cart_view(&mut self, user: &UserId) -> DomainResult<CartView> {
        let cart = self.carts.get_mut(user)?;
        view(cart, &self.inventory)
    }

    /// Try to reserve one unit of `title` into the user's cart.
    ///
    /// Admission only looks at this cart's own reservations: other carts may
    /// hold the same units, and checkout settles who gets them.
    pub fn reserve(&mut self, user: &UserId, title: &str) -> DomainResult<ReserveOutcome> {
        let item = self.inventory.find(title)?;
        let cart = self.carts.get_or_create(user);

        let held = cart.reserved_count(item);
        if item.stock() > held {
            cart.push_reservation(item.id_typed());
            info!(user = %user, title = item.title(), held = held + 1, "reservation admitted");
            Ok(ReserveOutcome::Admitted {
                title: item.title().to_string(),
                held: held + 1,
            })
        } else {
            debug!(user = %user, title = item.title(), held, stock = item.stock(), "reservation rejected");
            Ok(ReserveOutcome::Rejected {
                title: item.title().to_string(),
                held,
            })
        }
    }

    /// Commit the user's reservations against live stock and empty the cart.
    ///
    /// Reservations are settled earliest first; each one either takes a unit
    /// (purchased) or finds the item sold out (rejected). Rejected reservations
    /// are dropped, not carried over.
    pub fn checkout(&mut self, user: &UserId) -> DomainResult<CheckoutReceipt> {
        let cart = self.carts.get_mut(user)?;
        // Fails before any stock moves if a reservation does not resolve.
        let total_cost = cart.recompute_total(&self.inventory)?;

        let mut purchased: Vec<ItemId> = Vec::new();
        let mut rejected: Vec<ItemId> = Vec::new();
        for id in cart.reservations() {
            match self.inventory.take_one(*id) {
                Some(true) => purchased.push(*id),
                Some(false) => rejected.push(*id),
                None => {
                    return Err(DomainError::invariant(format!(
                        "item {id} vanished during checkout"
                    )));
                }
            }
        }
        cart.empty();

        let receipt = CheckoutReceipt {
            owner: user.clone(),
            purchased: snapshot(&self.inventory, &purchased),
            rejected: snapshot(&self.inventory, &rejected),
            total_cost,
            completed_at: Utc::now(),
        };
        info!(
            user = %user,
            purchased = receipt.purchased.len(),
            rejected = receipt.rejected.len(),
            total_cost = %total_cost,
            "checkout completed"
        );
        Ok(receipt)
    }
}

fn view(cart: &mut Cart, inventory: &Inventory) -> DomainResult<CartView> {
    let total_cost = cart.recompute_total(inventory)?;
    let items = cart.resolve(inventory)?.into_iter().cloned().collect();
    Ok(CartView {
        owner: cart.owner().clone(),
        items,
        total_cost,
    })
}

fn snapshot(inventory: &Inventory, ids: &[ItemId]) -> Vec<Item> {
    ids.iter()
        .filter_map(|id| inventory.get(*id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft(title: &str, cents: u64, stock: u64) -> ItemDraft {
        ItemDraft::new(title, Price::from_cents(cents), stock)
    }

    fn user(id: &str) -> UserId {
        UserId::from(id)
    }

    fn store_with(items: &[(&str, u64, u64)]) -> Store {
        let mut store = Store::new();
        for (title, cents, stock) in items {
            store.add_item(draft(title, *cents, *stock)).unwrap();
        }
        store
    }

    fn titles(items: &[Item]) -> Vec<&str> {
        items.iter().map(Item::title).collect()
    }

    #[test]
    fn single_unit_reserved_once_then_purchased() {
        let mut store = store_with(&[("Pencil", 4200, 1)]);
        let u1 = user("u1");

        assert!(store.reserve(&u1, "Pencil").unwrap().is_admitted());
        let second = store.reserve(&u1, "pencil").unwrap();
        assert_eq!(
            second,
            ReserveOutcome::Rejected {
                title: "Pencil".to_string(),
                held: 1
            }
        );
        assert_eq!(store.carts().get(&u1).unwrap().len(), 1);

        let receipt = store.checkout(&u1).unwrap();
        assert_eq!(titles(&receipt.purchased), vec!["Pencil"]);
        assert!(receipt.rejected.is_empty());
        assert_eq!(receipt.total_cost, Price::from_cents(4200));
        assert_eq!(store.find_item("Pencil").unwrap().stock(), 0);
        assert!(store.carts().get(&u1).unwrap().is_empty());
    }

    #[test]
    fn out_of_stock_item_is_rejected_without_mutation() {
        let mut store = store_with(&[("Eraser", 300, 0)]);
        let u1 = user("u1");

        let outcome = store.reserve(&u1, "Eraser").unwrap();
        assert!(!outcome.is_admitted());
        assert_eq!(outcome.held(), 0);
        assert!(store.carts().get(&u1).unwrap().is_empty());
    }

    #[test]
    fn reserving_unknown_item_is_not_found_and_creates_no_cart() {
        let mut store = store_with(&[("Pencil", 4200, 1)]);
        let err = store.reserve(&user("u1"), "Stapler").unwrap_err();
        assert!(err.is_not_found());
        assert!(store.carts().is_empty());
    }

    #[test]
    fn cross_cart_oversell_is_settled_at_checkout() {
        let mut store = store_with(&[("Pencil", 4200, 1)]);
        let (u1, u2) = (user("u1"), user("u2"));

        // Per-cart admission: both carts see one unit available.
        assert!(store.reserve(&u1, "Pencil").unwrap().is_admitted());
        assert!(store.reserve(&u2, "Pencil").unwrap().is_admitted());

        let first = store.checkout(&u1).unwrap();
        assert_eq!(titles(&first.purchased), vec!["Pencil"]);
        assert_eq!(store.find_item("Pencil").unwrap().stock(), 0);

        let second = store.checkout(&u2).unwrap();
        assert!(second.purchased.is_empty());
        assert_eq!(titles(&second.rejected), vec!["Pencil"]);
        assert_eq!(store.find_item("Pencil").unwrap().stock(), 0);
        assert!(store.carts().get(&u2).unwrap().is_empty());
    }

    #[test]
    fn checkout_preserves_reservation_order_within_partitions() {
        let mut store = store_with(&[("Pencil", 4200, 2), ("Eraser", 300, 1), ("Apple", 200_050, 5)]);
        let (u1, u2) = (user("u1"), user("u2"));

        for title in ["Apple", "Eraser", "Pencil", "Pencil"] {
            assert!(store.reserve(&u1, title).unwrap().is_admitted());
        }
        // Another cart drains the eraser and one pencil first.
        store.reserve(&u2, "Eraser").unwrap();
        store.reserve(&u2, "Pencil").unwrap();
        store.checkout(&u2).unwrap();

        let receipt = store.checkout(&u1).unwrap();
        assert_eq!(titles(&receipt.purchased), vec!["Apple", "Pencil"]);
        assert_eq!(titles(&receipt.rejected), vec!["Eraser", "Pencil"]);
        assert_eq!(store.find_item("Pencil").unwrap().stock(), 0);
        assert_eq!(store.find_item("Apple").unwrap().stock(), 4);
    }

    #[test]
    fn empty_checkout_is_a_no_op() {
        let mut store = store_with(&[("Pencil", 4200, 3)]);
        let u1 = user("u1");
        store.create_cart(&u1).unwrap();

        let receipt = store.checkout(&u1).unwrap();
        assert!(receipt.is_empty());
        assert_eq!(receipt.total_cost, Price::ZERO);
        assert_eq!(store.find_item("Pencil").unwrap().stock(), 3);
    }

    #[test]
    fn second_checkout_returns_nothing() {
        let mut store = store_with(&[("Pencil", 4200, 3)]);
        let u1 = user("u1");
        store.reserve(&u1, "Pencil").unwrap();

        assert_eq!(store.checkout(&u1).unwrap().purchased.len(), 1);
        let again = store.checkout(&u1).unwrap();
        assert!(again.is_empty());
        assert_eq!(store.find_item("Pencil").unwrap().stock(), 2);
    }

    #[test]
    fn checkout_without_cart_is_not_found() {
        let mut store = store_with(&[("Pencil", 4200, 3)]);
        let err = store.checkout(&user("ghost")).unwrap_err();
        assert_eq!(err, DomainError::cart_not_found("ghost"));
        assert!(store.cart_view(&user("ghost")).unwrap_err().is_not_found());
    }

    #[test]
    fn cart_view_reports_current_prices() {
        let mut store = store_with(&[("Pencil", 4200, 3), ("Eraser", 300, 3)]);
        let u1 = user("u1");
        store.reserve(&u1, "Pencil").unwrap();
        store.reserve(&u1, "Eraser").unwrap();
        assert_eq!(store.cart_view(&u1).unwrap().total_cost, Price::from_cents(4500));

        store.update_item("Pencil", draft("Pencil", 100, 3)).unwrap();
        let view = store.cart_view(&u1).unwrap();
        assert_eq!(view.total_cost, Price::from_cents(400));
        assert_eq!(titles(&view.items), vec!["Pencil", "Eraser"]);
    }

    #[test]
    fn rename_carries_reservations_along() {
        let mut store = store_with(&[("Pencil", 4200, 2)]);
        let u1 = user("u1");
        store.reserve(&u1, "Pencil").unwrap();

        store.update_item("pencil", draft("Graphite Pencil", 4200, 2)).unwrap();
        // Admission sees the existing reservation under the new title.
        assert_eq!(store.reserve(&u1, "graphite pencil").unwrap().held(), 2);
        assert!(!store.reserve(&u1, "Graphite Pencil").unwrap().is_admitted());

        let receipt = store.checkout(&u1).unwrap();
        assert_eq!(titles(&receipt.purchased), vec!["Graphite Pencil", "Graphite Pencil"]);
    }

    #[test]
    fn removing_an_item_purges_its_reservations() {
        let mut store = store_with(&[("Pencil", 4200, 2), ("Eraser", 300, 2)]);
        let (u1, u2) = (user("u1"), user("u2"));
        store.reserve(&u1, "Pencil").unwrap();
        store.reserve(&u1, "Eraser").unwrap();
        store.reserve(&u2, "Pencil").unwrap();

        let removed = store.remove_item("PENCIL").unwrap();
        assert_eq!(removed.title(), "Pencil");
        assert!(store.carts().get(&u2).unwrap().is_empty());

        let receipt = store.checkout(&u1).unwrap();
        assert_eq!(titles(&receipt.purchased), vec!["Eraser"]);
        assert!(receipt.rejected.is_empty());
    }

    #[test]
    fn dangling_reservation_fails_checkout_before_any_stock_moves() {
        let mut inventory = Inventory::new();
        let pencil = inventory.add(draft("Pencil", 4200, 2)).unwrap().id_typed();
        let mut carts = CartRegistry::new();
        let cart = carts.get_or_create(&user("u1"));
        cart.push_reservation(pencil);
        cart.push_reservation(ItemId::new());

        let mut store = Store::from_parts(inventory, carts);
        let err = store.checkout(&user("u1")).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(store.find_item("Pencil").unwrap().stock(), 2);
        assert_eq!(store.carts().get(&user("u1")).unwrap().len(), 2);
    }

    #[test]
    fn overflowing_total_does_not_block_checkout() {
        let mut store = Store::new();
        store
            .add_item(ItemDraft::new("Gold", Price::from_decimal(1e17).unwrap(), 2))
            .unwrap();
        let u1 = user("u1");
        assert!(store.reserve(&u1, "Gold").unwrap().is_admitted());
        assert!(store.reserve(&u1, "Gold").unwrap().is_admitted());

        let view = store.cart_view(&u1).unwrap();
        assert_eq!(view.total_cost, Price::MAX);
        assert_eq!(view.items.len(), 2);

        let receipt = store.checkout(&u1).unwrap();
        assert_eq!(titles(&receipt.purchased), vec!["Gold", "Gold"]);
        assert_eq!(receipt.total_cost, Price::MAX);
        assert_eq!(store.find_item("Gold").unwrap().stock(), 0);
        assert!(store.carts().get(&u1).unwrap().is_empty());
        assert!(store.checkout(&u1).unwrap().is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Reserve { user: usize, item: usize },
        Checkout { user: usize },
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0usize..3, 0usize..3).prop_map(|(user, item)| Op::Reserve { user, item }),
            1 => (0usize..3).prop_map(|user| Op::Checkout { user }),
        ]
    }

    const USERS: [&str; 3] = ["u1", "u2", "u3"];
    const ITEMS: [&str; 3] = ["Pencil", "Eraser", "Apple"];

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: admission, stock accounting and cart emptying hold for any
        /// interleaving of reservations and checkouts.
        #[test]
        fn reserve_and_checkout_keep_stock_consistent(
            stocks in prop::collection::vec(0u64..4, 3),
            ops in prop::collection::vec(op_strategy(), 0..60)
        ) {
            let mut store = Store::new();
            for (title, stock) in ITEMS.iter().zip(&stocks) {
                store.add_item(draft(title, 100, *stock)).unwrap();
            }

            for op in ops {
                match op {
                    Op::Reserve { user: u, item: i } => {
                        let user = user(USERS[u]);
                        let (stock, held_before) = {
                            let item = store.find_item(ITEMS[i]).unwrap();
                            let held = store
                                .carts()
                                .get(&user)
                                .map(|c| c.reserved_count(item))
                                .unwrap_or(0);
                            (item.stock(), held)
                        };

                        let outcome = store.reserve(&user, ITEMS[i]).unwrap();
                        prop_assert_eq!(outcome.is_admitted(), stock > held_before);
                        let len_after = store.carts().get(&user).unwrap().len();
                        if outcome.is_admitted() {
                            prop_assert_eq!(outcome.held(), held_before + 1);
                        } else {
                            prop_assert_eq!(outcome.held(), held_before);
                            // Rejection never mutates: retrying is still rejected.
                            let again = store.reserve(&user, ITEMS[i]).unwrap();
                            prop_assert!(!again.is_admitted());
                            prop_assert_eq!(store.carts().get(&user).unwrap().len(), len_after);
                        }
                    }
                    Op::Checkout { user: u } => {
                        let user = user(USERS[u]);
                        let reserved = match store.carts().get(&user) {
                            Ok(cart) => cart.len(),
                            Err(_) => {
                                prop_assert!(store.checkout(&user).unwrap_err().is_not_found());
                                continue;
                            }
                        };
                        let before: Vec<u64> = ITEMS
                            .iter()
                            .map(|t| store.find_item(t).unwrap().stock())
                            .collect();

                        let receipt = store.checkout(&user).unwrap();
                        prop_assert_eq!(receipt.purchased.len() + receipt.rejected.len(), reserved);
                        prop_assert!(store.carts().get(&user).unwrap().is_empty());

                        for (idx, title) in ITEMS.iter().enumerate() {
                            let after = store.find_item(title).unwrap().stock();
                            let bought = receipt
                                .purchased
                                .iter()
                                .filter(|item| item.title() == *title)
                                .count() as u64;
                            prop_assert!(after <= before[idx]);
                            prop_assert_eq!(before[idx] - after, bought);
                        }
                    }
                }
            }
        }
    }
}
