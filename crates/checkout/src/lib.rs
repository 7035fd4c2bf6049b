//! Reservation/checkout engine.
//!
//! `Store` owns the inventory and every cart and exposes the typed operations
//! the transport layer calls. `SharedStore` serializes those operations for
//! concurrent callers.

pub mod shared;
pub mod store;

pub use shared::SharedStore;
pub use store::{CartView, CheckoutReceipt, ReserveOutcome, Store};
