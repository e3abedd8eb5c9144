//! Engine-wide limits shared by every pool.

use serde::{Deserialize, Serialize};

use crate::domain::{BasisPoints, Decimals, SqrtPrice, Tick};
use crate::error::{AmmError, Result};

/// Inclusive tick domain a pool's ledger spans.
///
/// The two ends become the ledger's permanent sentinel ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickBounds {
    min: Tick,
    max: Tick,
}

impl TickBounds {
    /// Bounds over a sub-domain.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidRange`] unless `min < max`.
    pub const fn new(min: Tick, max: Tick) -> Result<Self> {
        if min.get() >= max.get() {
            return Err(AmmError::InvalidRange {
                lower: min.get(),
                upper: max.get(),
            });
        }
        Ok(Self { min, max })
    }

    /// Lowest tick.
    #[must_use]
    pub const fn min(&self) -> Tick {
        self.min
    }

    /// Highest tick.
    #[must_use]
    pub const fn max(&self) -> Tick {
        self.max
    }

    /// Returns `true` if `tick` lies within the bounds.
    #[must_use]
    pub const fn contains(&self, tick: Tick) -> bool {
        self.min.get() <= tick.get() && tick.get() <= self.max.get()
    }

    /// Sqrt prices of both ends.
    ///
    /// # Errors
    ///
    /// Propagates tick-math failures.
    pub fn sqrt_prices(&self) -> Result<(SqrtPrice, SqrtPrice)> {
        Ok((self.min.sqrt_price()?, self.max.sqrt_price()?))
    }
}

impl Default for TickBounds {
    fn default() -> Self {
        Self {
            min: Tick::MIN,
            max: Tick::MAX,
        }
    }
}

/// Immutable limits passed to every component at construction.
///
/// # Examples
///
/// ```
/// use tick_amm::config::EngineConfig;
/// use tick_amm::domain::BasisPoints;
///
/// let engine = EngineConfig::default().with_max_fee(BasisPoints::new(500));
/// assert!(engine.validate().is_ok());
/// assert_eq!(engine.newton_iterations(), 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    max_fee: BasisPoints,
    newton_iterations: u32,
    convergence_tolerance: u32,
    stable_precision: Decimals,
    max_amplification: u32,
    tick_bounds: TickBounds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_fee: BasisPoints::new(1_000),
            newton_iterations: 255,
            convergence_tolerance: 1,
            stable_precision: Decimals::MAX,
            max_amplification: 1_000_000,
            tick_bounds: TickBounds::default(),
        }
    }
}

impl EngineConfig {
    /// Replaces the fee ceiling.
    #[must_use]
    pub const fn with_max_fee(mut self, max_fee: BasisPoints) -> Self {
        self.max_fee = max_fee;
        self
    }

    /// Replaces the Newton iteration cap.
    #[must_use]
    pub const fn with_newton_iterations(mut self, iterations: u32) -> Self {
        self.newton_iterations = iterations;
        self
    }

    /// Replaces the Newton convergence tolerance.
    #[must_use]
    pub const fn with_convergence_tolerance(mut self, tolerance: u32) -> Self {
        self.convergence_tolerance = tolerance;
        self
    }

    /// Replaces the stable-curve common precision.
    #[must_use]
    pub const fn with_stable_precision(mut self, precision: Decimals) -> Self {
        self.stable_precision = precision;
        self
    }

    /// Replaces the amplification ceiling.
    #[must_use]
    pub const fn with_max_amplification(mut self, max_amplification: u32) -> Self {
        self.max_amplification = max_amplification;
        self
    }

    /// Replaces the tick domain.
    #[must_use]
    pub const fn with_tick_bounds(mut self, tick_bounds: TickBounds) -> Self {
        self.tick_bounds = tick_bounds;
        self
    }

    /// Checks internal consistency.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidSwapFee`] if the fee ceiling is 100% or more.
    /// - [`AmmError::InvalidConfiguration`] for a zero iteration cap, zero
    ///   tolerance, or zero amplification ceiling.
    /// - [`AmmError::InvalidRange`] for inverted tick bounds.
    pub fn validate(&self) -> Result<()> {
        if !self.max_fee.is_fractional() {
            return Err(AmmError::InvalidSwapFee {
                fee: self.max_fee.get(),
                max: BasisPoints::DENOMINATOR - 1,
            });
        }
        if self.newton_iterations == 0 {
            return Err(AmmError::InvalidConfiguration(
                "newton iteration cap must be positive",
            ));
        }
        if self.convergence_tolerance == 0 {
            return Err(AmmError::InvalidConfiguration(
                "convergence tolerance must be positive",
            ));
        }
        if self.max_amplification == 0 {
            return Err(AmmError::InvalidConfiguration(
                "amplification ceiling must be positive",
            ));
        }
        TickBounds::new(self.tick_bounds.min, self.tick_bounds.max)?;
        Ok(())
    }

    /// Highest swap fee a pool may charge.
    #[must_use]
    pub const fn max_fee(&self) -> BasisPoints {
        self.max_fee
    }

    /// Newton-Raphson iteration cap.
    #[must_use]
    pub const fn newton_iterations(&self) -> u32 {
        self.newton_iterations
    }

    /// Largest difference between successive Newton estimates that counts
    /// as converged.
    #[must_use]
    pub const fn convergence_tolerance(&self) -> u32 {
        self.convergence_tolerance
    }

    /// Precision stable curves normalize reserves to.
    #[must_use]
    pub const fn stable_precision(&self) -> Decimals {
        self.stable_precision
    }

    /// Largest accepted amplification coefficient.
    #[must_use]
    pub const fn max_amplification(&self) -> u32 {
        self.max_amplification
    }

    /// Tick domain for concentrated pools.
    #[must_use]
    pub const fn tick_bounds(&self) -> TickBounds {
        self.tick_bounds
    }
}
