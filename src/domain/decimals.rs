//! Token decimal places.

use serde::{Deserialize, Serialize};

use crate::error::{AmmError, Result};

const MAX_DECIMALS: u8 = 18;

/// Number of decimal places a token uses, in `0..=18`.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::Decimals;
///
/// let usdc = Decimals::new(6).expect("valid");
/// assert_eq!(usdc.scale_to(Decimals::MAX), Ok(1_000_000_000_000));
/// assert!(Decimals::new(19).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Eighteen decimal places, the common precision curves normalize to.
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Validates and wraps a decimal count.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// `10^(target - self)`, the multiplier that lifts amounts to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `target` has fewer places
    /// than `self`.
    pub const fn scale_to(&self, target: Self) -> Result<u128> {
        if target.0 < self.0 {
            return Err(AmmError::InvalidPrecision(
                "cannot scale to fewer decimal places",
            ));
        }
        Ok(10u128.pow((target.0 - self.0) as u32))
    }
}

impl Default for Decimals {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u8> for Decimals {
    type Error = AmmError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Decimals> for u8 {
    fn from(value: Decimals) -> Self {
        value.0
    }
}
