//! Shopping cart domain module.
//!
//! Carts hold uncommitted reservations against catalog items. They never copy
//! item data; reservations are `ItemId`s resolved against the `Inventory`
//! whenever a price or title is needed.

pub mod cart;
pub mod registry;

pub use cart::Cart;
pub use registry::CartRegistry;
