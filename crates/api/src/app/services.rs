//! Store construction for the API process.

use shopcart_checkout::Store;
use shopcart_core::{DomainResult, Price, UserId};
use shopcart_inventory::{ItemDraft, StockFilter};

/// Demo catalog: `(title, price in cents, stock)`.
const DEMO_CATALOG: [(&str, u64, u64); 4] = [
    ("Pencil", 4_200, 9_001),
    ("Apple", 200_050, 200_000),
    ("Eraser", 300, 13),
    ("Supreme Hoodie", 50_050, 0),
];

pub const DEMO_FULL_CART: &str = "my_cart";
pub const DEMO_EMPTY_CART: &str = "cart_1";

pub fn empty_store() -> Store {
    Store::new()
}

/// Store preloaded with the demo catalog, a cart holding one of every
/// admissible item, and an empty cart.
pub fn seeded_store() -> DomainResult<Store> {
    let mut store = Store::new();
    for (title, cents, stock) in DEMO_CATALOG {
        store.add_item(ItemDraft::new(title, Price::from_cents(cents), stock))?;
    }

    let full = UserId::from(DEMO_FULL_CART);
    store.create_cart(&full)?;
    let titles: Vec<String> = store
        .list_items(StockFilter::All)
        .into_iter()
        .map(|item| item.title().to_string())
        .collect();
    for title in titles {
        // Out-of-stock items are simply not admitted.
        store.reserve(&full, &title)?;
    }

    store.create_cart(&UserId::from(DEMO_EMPTY_CART))?;
    tracing::debug!(items = store.inventory().len(), carts = store.carts().len(), "demo data seeded");
    Ok(store)
}
