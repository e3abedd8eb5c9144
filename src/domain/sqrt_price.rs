//! Q64.96 square-root price.

use core::fmt;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::Tick;
use crate::error::{AmmError, Result};
use crate::math::tick_math::{q96, sqrt_ratio_at_tick, tick_at_sqrt_ratio};
use crate::math::{MAX_SQRT_RATIO, MIN_SQRT_RATIO};

/// `sqrt(token1 / token0) * 2^96`, restricted to the tick domain.
///
/// Every value maps to exactly one [`Tick`]: the greatest tick whose price
/// does not exceed it.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::{SqrtPrice, Tick};
///
/// let unit = SqrtPrice::unit();
/// assert_eq!(unit.tick().ok(), Some(Tick::ZERO));
///
/// let at_max = SqrtPrice::from_tick(Tick::MAX).expect("in domain");
/// assert_eq!(at_max, SqrtPrice::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "U256", into = "U256")]
pub struct SqrtPrice(U256);

impl SqrtPrice {
    /// Sqrt price at [`Tick::MIN`].
    pub const MIN: Self = Self(MIN_SQRT_RATIO);

    /// Sqrt price at [`Tick::MAX`].
    pub const MAX: Self = Self(MAX_SQRT_RATIO);

    /// Validates a raw Q64.96 value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrice`] outside `[MIN, MAX]`.
    pub fn new(raw: U256) -> Result<Self> {
        if raw < MIN_SQRT_RATIO || raw > MAX_SQRT_RATIO {
            return Err(AmmError::InvalidPrice("sqrt price outside the tick domain"));
        }
        Ok(Self(raw))
    }

    /// Price 1.
    #[must_use]
    pub fn unit() -> Self {
        Self(q96())
    }

    /// Exact sqrt price of `tick`.
    ///
    /// # Errors
    ///
    /// Propagates [`sqrt_ratio_at_tick`] failures.
    pub fn from_tick(tick: Tick) -> Result<Self> {
        sqrt_ratio_at_tick(tick.get()).map(Self)
    }

    /// Raw Q64.96 value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Greatest tick at or below this price.
    ///
    /// # Errors
    ///
    /// Propagates [`tick_at_sqrt_ratio`] failures.
    pub fn tick(&self) -> Result<Tick> {
        Tick::new(tick_at_sqrt_ratio(self.0)?)
    }
}

impl TryFrom<U256> for SqrtPrice {
    type Error = AmmError;

    fn try_from(raw: U256) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<SqrtPrice> for U256 {
    fn from(value: SqrtPrice) -> Self {
        value.0
    }
}

impl fmt::Display for SqrtPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
