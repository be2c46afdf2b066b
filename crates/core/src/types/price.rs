//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price in the store's single display currency.
///
/// Backed by [`Decimal`] so line totals and order totals are exact. The
/// persisted storage format carries prices as plain JSON numbers, which the
/// workspace-wide `serde-float` feature of `rust_decimal` preserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is negative.
    ///
    /// Catalog validation rejects negative prices; the type itself stays
    /// permissive so persisted data can be loaded and repaired.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Line total for `qty` units at this price.
    #[must_use]
    pub fn times(&self, qty: u32) -> Self {
        Self(self.0 * Decimal::from(qty))
    }

    /// Parse a price from a decimal string such as `"24.99"`.
    ///
    /// # Errors
    ///
    /// Returns [`rust_decimal::Error`] if the input is not a valid decimal.
    pub fn parse(s: &str) -> Result<Self, rust_decimal::Error> {
        s.parse::<Decimal>().map(Self)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::from_cents(2999).to_string(), "$29.99");
        assert_eq!(Price::from_cents(350).to_string(), "$3.50");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_times_and_sum() {
        let a = Price::from_cents(1000).times(2);
        let b = Price::from_cents(500).times(1);
        let total: Price = [a, b].into_iter().sum();
        assert_eq!(total, Price::from_cents(2500));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Price::parse("24.99").unwrap(), Price::from_cents(2499));
        assert!(Price::parse("not-a-price").is_err());
    }

    #[test]
    fn test_is_negative() {
        assert!(Price::from_cents(-1).is_negative());
        assert!(!Price::ZERO.is_negative());
        assert!(!Price::from_cents(1).is_negative());
    }

    #[test]
    fn test_serde_as_number() {
        let price = Price::from_cents(1250);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "12.5");

        let parsed: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(parsed, price);
    }
}
