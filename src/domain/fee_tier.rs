//! Standard fee tiers.

use serde::{Deserialize, Serialize};

use super::BasisPoints;

/// A swap fee rate paired with the tick spacing conventionally used with it.
///
/// Concentrated pools take both values from the tier unless the config
/// overrides the spacing.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::FeeTier;
///
/// assert_eq!(FeeTier::MEDIUM.fee().get(), 30);
/// assert_eq!(FeeTier::MEDIUM.tick_spacing(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeTier {
    fee: BasisPoints,
    tick_spacing: u32,
}

impl FeeTier {
    /// 1 bp, spacing 1.
    pub const LOWEST: Self = Self::new(BasisPoints::new(1), 1);
    /// 5 bps, spacing 10.
    pub const LOW: Self = Self::new(BasisPoints::new(5), 10);
    /// 30 bps, spacing 60.
    pub const MEDIUM: Self = Self::new(BasisPoints::new(30), 60);
    /// 100 bps, spacing 200.
    pub const HIGH: Self = Self::new(BasisPoints::new(100), 200);

    /// Creates a custom tier.
    #[must_use]
    pub const fn new(fee: BasisPoints, tick_spacing: u32) -> Self {
        Self { fee, tick_spacing }
    }

    /// Swap fee rate.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }

    /// Distance between initializable ticks.
    #[must_use]
    pub const fn tick_spacing(&self) -> u32 {
        self.tick_spacing
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::MEDIUM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_ascend() {
        let tiers = [FeeTier::LOWEST, FeeTier::LOW, FeeTier::MEDIUM, FeeTier::HIGH];
        for pair in tiers.windows(2) {
            assert!(pair[0].fee() < pair[1].fee());
            assert!(pair[0].tick_spacing() < pair[1].tick_spacing());
        }
    }

    #[test]
    fn default_is_medium() {
        assert_eq!(FeeTier::default(), FeeTier::MEDIUM);
    }
}
