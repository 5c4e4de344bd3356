//! Naira price representation.
//!
//! Prices on the storefront are quoted in whole Naira with no kobo
//! subdivision, so a price is a plain non-negative integer. Arithmetic
//! saturates instead of wrapping; a cart can never realistically reach
//! `u64::MAX` Naira, but a corrupt quantity must not panic the store.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// A price in whole Naira.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero Naira.
    pub const ZERO: Self = Self(0);

    /// Currency symbol used for display.
    pub const SYMBOL: &'static str = "₦";

    /// Create a price from a whole-Naira amount.
    #[must_use]
    pub const fn new(naira: u64) -> Self {
        Self(naira)
    }

    /// Get the amount in whole Naira.
    #[must_use]
    pub const fn naira(&self) -> u64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Sum of two prices.
    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Whether this price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Price {
    fn from(naira: u64) -> Self {
        Self(naira)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::plus)
    }
}

/// Formats as `₦12,000`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "{}{grouped}", Self::SYMBOL)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times() {
        assert_eq!(Price::new(1200).times(10), Price::new(12_000));
        assert_eq!(Price::new(1200).times(0), Price::ZERO);
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::new(12_500), Price::new(24_000)].into_iter().sum();
        assert_eq!(total, Price::new(36_500));
        let empty: Price = core::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::new(0).to_string(), "₦0");
        assert_eq!(Price::new(950).to_string(), "₦950");
        assert_eq!(Price::new(12_000).to_string(), "₦12,000");
        assert_eq!(Price::new(1_234_567).to_string(), "₦1,234,567");
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Price::new(2500)).unwrap(), "2500");
        let price: Price = serde_json::from_str("2500").unwrap();
        assert_eq!(price.naira(), 2500);
    }

    #[test]
    fn test_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }
}
