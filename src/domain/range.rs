//! Half-open tick range.

use serde::{Deserialize, Serialize};

use super::Tick;
use crate::error::{AmmError, Result};

/// A position range `[lower, upper)`.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::{Tick, TickRange};
///
/// let full = TickRange::full();
/// assert!(full.contains(Tick::ZERO));
/// assert!(!full.contains(Tick::MAX));
/// assert!(TickRange::new(Tick::ZERO, Tick::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(Tick, Tick)", into = "(Tick, Tick)")]
pub struct TickRange {
    lower: Tick,
    upper: Tick,
}

impl TickRange {
    /// Validates a range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidRange`] if `lower >= upper`.
    pub const fn new(lower: Tick, upper: Tick) -> Result<Self> {
        if lower.get() >= upper.get() {
            return Err(AmmError::InvalidRange {
                lower: lower.get(),
                upper: upper.get(),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Validates raw indices.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTick`] for an out-of-domain index, or
    /// [`AmmError::InvalidRange`] if `lower >= upper`.
    pub fn from_indices(lower: i32, upper: i32) -> Result<Self> {
        Self::new(Tick::new(lower)?, Tick::new(upper)?)
    }

    /// `[Tick::MIN, Tick::MAX)`.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            lower: Tick::MIN,
            upper: Tick::MAX,
        }
    }

    /// Inclusive lower tick.
    #[must_use]
    pub const fn lower(&self) -> Tick {
        self.lower
    }

    /// Exclusive upper tick.
    #[must_use]
    pub const fn upper(&self) -> Tick {
        self.upper
    }

    /// Returns `true` if `lower <= tick < upper`.
    #[must_use]
    pub const fn contains(&self, tick: Tick) -> bool {
        self.lower.get() <= tick.get() && tick.get() < self.upper.get()
    }
}

impl TryFrom<(Tick, Tick)> for TickRange {
    type Error = AmmError;

    fn try_from((lower, upper): (Tick, Tick)) -> Result<Self> {
        Self::new(lower, upper)
    }
}

impl From<TickRange> for (Tick, Tick) {
    fn from(range: TickRange) -> Self {
        (range.lower, range.upper)
    }
}
