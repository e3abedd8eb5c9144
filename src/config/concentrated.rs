//! Configuration for concentrated-liquidity pools.

use serde::{Deserialize, Serialize};

use super::EngineConfig;
use crate::domain::{FeeTier, SqrtPrice, TokenPair};
use crate::error::{AmmError, Result};

/// Widest tick spacing accepted.
pub const MAX_TICK_SPACING: u32 = 16_384;

/// A tick-ranged pool: token pair, fee tier, and starting price.
///
/// # Examples
///
/// ```
/// use tick_amm::config::{ConcentratedConfig, EngineConfig};
/// use tick_amm::domain::{Address, Decimals, FeeTier, SqrtPrice, Token, TokenPair};
///
/// let d = Decimals::new(18).expect("valid");
/// let pair = TokenPair::new(
///     Token::new(Address::from_bytes([1u8; 32]), d),
///     Token::new(Address::from_bytes([2u8; 32]), d),
/// )
/// .expect("distinct");
///
/// let config = ConcentratedConfig::new(pair, FeeTier::MEDIUM, SqrtPrice::unit(), &EngineConfig::default());
/// assert!(config.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcentratedConfig {
    token_pair: TokenPair,
    fee_tier: FeeTier,
    initial_sqrt_price: SqrtPrice,
}

impl ConcentratedConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// See [`ConcentratedConfig::validate`].
    pub fn new(
        token_pair: TokenPair,
        fee_tier: FeeTier,
        initial_sqrt_price: SqrtPrice,
        engine: &EngineConfig,
    ) -> Result<Self> {
        let config = Self {
            token_pair,
            fee_tier,
            initial_sqrt_price,
        };
        config.validate(engine)?;
        Ok(config)
    }

    /// Checks the configuration against engine limits.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidSwapFee`] if the fee exceeds the engine ceiling.
    /// - [`AmmError::InvalidConfiguration`] for a tick spacing of zero or
    ///   above [`MAX_TICK_SPACING`].
    /// - [`AmmError::InvalidPrice`] if the starting price lies outside the
    ///   engine's tick bounds.
    pub fn validate(&self, engine: &EngineConfig) -> Result<()> {
        let fee = self.fee_tier.fee();
        if fee > engine.max_fee() {
            return Err(AmmError::InvalidSwapFee {
                fee: fee.get(),
                max: engine.max_fee().get(),
            });
        }
        let spacing = self.fee_tier.tick_spacing();
        if spacing == 0 || spacing > MAX_TICK_SPACING {
            return Err(AmmError::InvalidConfiguration(
                "tick spacing must be in 1..=16384",
            ));
        }
        let (lowest, highest) = engine.tick_bounds().sqrt_prices()?;
        if self.initial_sqrt_price < lowest || self.initial_sqrt_price > highest {
            return Err(AmmError::InvalidPrice(
                "initial price outside the configured tick bounds",
            ));
        }
        Ok(())
    }

    /// Pooled tokens.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Fee rate and tick spacing.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Price the pool opens at.
    #[must_use]
    pub const fn initial_sqrt_price(&self) -> SqrtPrice {
        self.initial_sqrt_price
    }
}
