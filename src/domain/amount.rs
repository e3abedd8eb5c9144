//! Raw token amount.

use core::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::{AmmError, Result};
use crate::math::SafeCast;

/// A raw token amount in the token's smallest unit.
///
/// `Amount` never interprets decimals; curves that need a common precision
/// scale through [`Decimals`](super::Decimals). Arithmetic is checked and
/// reports overflow as [`AmmError::Overflow`] with the given context.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::Amount;
///
/// let a = Amount::new(100);
/// assert_eq!(a.checked_add(Amount::new(50), "sum"), Ok(Amount::new(150)));
/// assert!(a.checked_sub(Amount::new(101), "difference").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from raw units.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Narrows a 256-bit intermediate into an amount.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::CastOverflow`] if `value` exceeds `u128`.
    pub fn from_u256(value: U256) -> Result<Self> {
        Ok(Self(value.safe_cast()?))
    }

    /// Returns the raw units.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Widens to 256 bits.
    #[must_use]
    pub fn as_u256(&self) -> U256 {
        U256::from(self.0)
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] carrying `context` on overflow.
    pub const fn checked_add(self, other: Self, context: &'static str) -> Result<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Ok(Self(v)),
            None => Err(AmmError::Overflow(context)),
        }
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] carrying `context` on underflow.
    pub const fn checked_sub(self, other: Self, context: &'static str) -> Result<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Ok(Self(v)),
            None => Err(AmmError::Overflow(context)),
        }
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
