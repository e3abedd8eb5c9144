//! Liquidity units.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::liquidity_math::add_delta;

/// Liquidity units: `sqrt(x * y)` for a concentrated range, or pool shares
/// for a reserve-curve pool.
///
/// Distinct from [`Amount`](super::Amount) because it does not denominate
/// any single token.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::Liquidity;
///
/// let a = Liquidity::new(1_000);
/// assert_eq!(a.checked_add(Liquidity::new(2_000)), Some(Liquidity::new(3_000)));
/// assert_eq!(a.apply_delta(-400), Ok(Liquidity::new(600)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use]
pub struct Liquidity(u128);

impl Liquidity {
    /// No liquidity.
    pub const ZERO: Self = Self(0);

    /// Wraps raw liquidity units.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw units.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition, `None` on overflow.
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction, `None` on underflow.
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Applies a signed net-liquidity delta.
    ///
    /// # Errors
    ///
    /// Propagates [`add_delta`] failures.
    pub fn apply_delta(self, delta: i128) -> Result<Self> {
        add_delta(self.0, delta).map(Self)
    }
}

impl From<u128> for Liquidity {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmmError;

    #[test]
    fn checked_arithmetic() {
        assert_eq!(Liquidity::new(u128::MAX).checked_add(Liquidity::new(1)), None);
        assert_eq!(Liquidity::ZERO.checked_sub(Liquidity::new(1)), None);
    }

    #[test]
    fn negative_delta_below_zero_fails() {
        assert!(matches!(
            Liquidity::new(5).apply_delta(-6),
            Err(AmmError::InsufficientLiquidity { .. })
        ));
    }
}
