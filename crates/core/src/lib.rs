//! `shopcart-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, money, and the error model shared by the inventory, cart and
//! checkout crates.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, ItemKey, UserId};
pub use money::Price;
pub use value_object::ValueObject;
