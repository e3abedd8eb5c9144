//! Tick index.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::SqrtPrice;
use crate::error::{AmmError, Result};
use crate::math::tick_math::{MAX_TICK, MIN_TICK};

/// A discrete price point where `price = 1.0001^tick`.
///
/// Valid indices lie in `[-887272, 887272]`. The two ends double as the
/// permanent sentinels of every tick ledger.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::Tick;
///
/// let tick = Tick::new(120).expect("in domain");
/// assert!(tick.is_multiple_of(60));
/// assert!(Tick::new(900_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Tick(i32);

impl Tick {
    /// Lower domain boundary.
    pub const MIN: Self = Self(MIN_TICK);

    /// Upper domain boundary.
    pub const MAX: Self = Self(MAX_TICK);

    /// Unit price.
    pub const ZERO: Self = Self(0);

    /// Validates and wraps a tick index.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTick`] outside `[MIN, MAX]`.
    pub const fn new(value: i32) -> Result<Self> {
        if value < MIN_TICK || value > MAX_TICK {
            return Err(AmmError::InvalidTick {
                tick: value,
                reason: "outside the tick domain",
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Returns `true` if the index is a multiple of `spacing`.
    ///
    /// A zero spacing accepts nothing.
    #[must_use]
    pub const fn is_multiple_of(&self, spacing: u32) -> bool {
        spacing != 0 && (self.0 as i64) % (spacing as i64) == 0
    }

    /// Sqrt price at this tick.
    ///
    /// # Errors
    ///
    /// Propagates [`SqrtPrice::from_tick`] failures.
    pub fn sqrt_price(&self) -> Result<SqrtPrice> {
        SqrtPrice::from_tick(*self)
    }
}

impl TryFrom<i32> for Tick {
    type Error = AmmError;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Tick> for i32 {
    fn from(value: Tick) -> Self {
        value.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tick({})", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tick(v: i32) -> Tick {
        let Ok(t) = Tick::new(v) else {
            panic!("expected Ok");
        };
        t
    }

    // -- construction -------------------------------------------------------

    #[test]
    fn domain_edges() {
        assert_eq!(tick(MIN_TICK), Tick::MIN);
        assert_eq!(tick(MAX_TICK), Tick::MAX);
        assert!(matches!(
            Tick::new(MAX_TICK + 1),
            Err(AmmError::InvalidTick { tick, .. }) if tick == MAX_TICK + 1
        ));
        assert!(Tick::new(MIN_TICK - 1).is_err());
    }

    // -- spacing ------------------------------------------------------------

    #[test]
    fn spacing_alignment() {
        assert!(tick(-120).is_multiple_of(60));
        assert!(!tick(-119).is_multiple_of(60));
        assert!(Tick::ZERO.is_multiple_of(1));
        assert!(!Tick::ZERO.is_multiple_of(0));
    }

    // -- serde --------------------------------------------------------------

    #[test]
    fn deserialization_validates() {
        assert_eq!(serde_json::from_str::<Tick>("-60").ok(), Some(tick(-60)));
        assert!(serde_json::from_str::<Tick>("887273").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(tick(-7).to_string(), "Tick(-7)");
    }
}
