//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront sells in a single currency (USD), so a price is just an
//! exact decimal amount. Floating point is never used for money: the cart
//! total of `29.99 + 2 × 39.99` must be exactly `109.97`.
//!
//! Unit prices are validated to lie in `0..=Price::MAX`, which keeps every
//! line total and cart total far inside `Decimal`'s range. Arithmetic still
//! saturates rather than panicking.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::quantity::Quantity;

/// Errors that can occur when validating a [`Price`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),

    /// The amount exceeds [`Price::MAX`].
    #[error("price exceeds maximum of {max}: {amount}")]
    TooLarge { amount: Decimal, max: Decimal },
}

/// A price in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest accepted unit price, $1,000,000.00.
    pub const MAX: Self = Self::from_cents(100_000_000);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or above [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge {
                amount,
                max: Self::MAX.0,
            });
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    ///
    /// ```
    /// use deskfront_core::Price;
    ///
    /// assert_eq!(Price::from_cents(2999).to_string(), "$29.99");
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_cents(cents: u64) -> Self {
        let lo = cents as u32;
        let mid = (cents >> 32) as u32;
        Self(Decimal::from_parts(lo, mid, 0, false, 2))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity.get())))
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
