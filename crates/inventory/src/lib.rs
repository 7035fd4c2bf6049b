//! Inventory domain module.
//!
//! This crate owns the product catalog and its stock levels, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod catalog;
pub mod item;

pub use catalog::{Inventory, StockFilter};
pub use item::{Item, ItemDraft};
