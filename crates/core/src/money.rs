//! Money value used for catalog prices and cart totals.

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Non-negative price in the smallest currency unit (cents).
///
/// Integer minor units keep cart totals exact; the transport layer converts
/// to and from decimal numbers at the edge.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);
    pub const MAX: Price = Price(u64::MAX);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Convert a decimal amount (e.g. `42.00`) to a price, rounding to the nearest cent.
    pub fn from_decimal(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        let cents = (amount * 100.0).round();
        // `u64::MAX as f64` rounds up to 2^64, which does not fit.
        if cents >= u64::MAX as f64 {
            return Err(DomainError::validation("price is too large"));
        }
        Ok(Self(cents as u64))
    }

    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn saturating_add(self, other: Price) -> Price {
        Price(self.0.saturating_add(other.0))
    }

    /// Sum a sequence of prices, clamping at [`Price::MAX`] instead of wrapping.
    pub fn total<I>(prices: I) -> Price
    where
        I: IntoIterator<Item = Price>,
    {
        prices.into_iter().fold(Price::ZERO, Price::saturating_add)
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
