//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two values with the same attributes are
/// the same value. `Price` and `ItemKey` are value objects; `Item` and `Cart`
/// are entities (see [`crate::Entity`]).
///
/// The trait requires `Clone + PartialEq + Debug` so values can be copied into
/// results, compared in tests and logged.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
