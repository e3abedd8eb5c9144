//! Top-level pool configuration.

use serde::{Deserialize, Serialize};

use super::{ConcentratedConfig, CurvePoolConfig, EngineConfig};
use crate::domain::TokenPair;
use crate::error::Result;

/// Every pool the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolConfig {
    /// Constant-product, stable, or weighted reserves.
    Curve(CurvePoolConfig),
    /// Tick-ranged liquidity.
    Concentrated(ConcentratedConfig),
}

impl PoolConfig {
    /// Validates the wrapped configuration.
    ///
    /// # Errors
    ///
    /// Propagates the variant's `validate` failure.
    pub fn validate(&self, engine: &EngineConfig) -> Result<()> {
        match self {
            Self::Curve(config) => config.validate(engine),
            Self::Concentrated(config) => config.validate(engine),
        }
    }

    /// Pooled tokens.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        match self {
            Self::Curve(config) => config.token_pair(),
            Self::Concentrated(config) => config.token_pair(),
        }
    }
}

impl From<CurvePoolConfig> for PoolConfig {
    fn from(config: CurvePoolConfig) -> Self {
        Self::Curve(config)
    }
}

impl From<ConcentratedConfig> for PoolConfig {
    fn from(config: ConcentratedConfig) -> Self {
        Self::Concentrated(config)
    }
}
