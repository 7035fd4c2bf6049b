//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// missing records, conflicting writes). A reservation denied by the stock rule
/// is *not* an error; it is reported as a normal outcome by the checkout engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty title, negative price).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A requested record (item or cart) does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// An item with the same case-insensitive title already exists.
    #[error("duplicate item: {0}")]
    DuplicateItem(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn item_not_found(title: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "item",
            key: title.into(),
        }
    }

    pub fn cart_not_found(user: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "cart",
            key: user.into(),
        }
    }

    pub fn duplicate_item(title: impl Into<String>) -> Self {
        Self::DuplicateItem(title.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
