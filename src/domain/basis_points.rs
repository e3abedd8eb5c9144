//! Fee rates in basis points.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::Result;
use crate::math::mul_div_u128;

/// A rate in basis points, where `10_000` is 100%.
///
/// Construction is infallible; range checks against the configured fee
/// ceiling happen when a pool config is validated.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::{Amount, BasisPoints, Rounding};
///
/// let fee = BasisPoints::new(30);
/// assert_eq!(fee.apply(Amount::new(10_000), Rounding::Up), Ok(Amount::new(30)));
/// assert_eq!(fee.complement(), Some(BasisPoints::new(9_970)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Basis points in one whole.
    pub const DENOMINATOR: u32 = 10_000;

    /// Zero rate.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw basis-point value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the rate is strictly below 100%.
    #[must_use]
    pub const fn is_fractional(&self) -> bool {
        self.0 < Self::DENOMINATOR
    }

    /// `10_000 - self`, or `None` if the rate exceeds 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match Self::DENOMINATOR.checked_sub(self.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Applies the rate to `amount` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Propagates [`mul_div_u128`] failures.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Result<Amount> {
        mul_div_u128(
            amount.get(),
            u128::from(self.0),
            u128::from(Self::DENOMINATOR),
            rounding,
        )
        .map(Amount::new)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn apply_rounds_as_asked() {
        let fee = BasisPoints::new(30);
        assert_eq!(fee.apply(Amount::new(999), Rounding::Down), Ok(Amount::new(2)));
        assert_eq!(fee.apply(Amount::new(999), Rounding::Up), Ok(Amount::new(3)));
    }

    #[test]
    fn complement_bounds() {
        assert_eq!(BasisPoints::ZERO.complement(), Some(BasisPoints::new(10_000)));
        assert_eq!(BasisPoints::new(10_001).complement(), None);
        assert!(!BasisPoints::new(10_000).is_fractional());
    }

    #[test]
    fn serializes_as_plain_number() {
        let Ok(json) = serde_json::to_string(&BasisPoints::new(5)) else {
            panic!("expected Ok");
        };
        assert_eq!(json, "5");
    }

    #[test]
    fn display() {
        assert_eq!(BasisPoints::new(30).to_string(), "30bps");
    }
}
