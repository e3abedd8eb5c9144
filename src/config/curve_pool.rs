//! Configuration for reserve-curve pools.

use serde::{Deserialize, Serialize};

use super::{CurveParameters, EngineConfig};
use crate::domain::TokenPair;
use crate::error::Result;

/// A token pair priced by one of the reserve curves.
///
/// Reserves start empty; the first mint seeds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurvePoolConfig {
    token_pair: TokenPair,
    params: CurveParameters,
}

impl CurvePoolConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`CurveParameters::validate`] failures.
    pub fn new(token_pair: TokenPair, params: CurveParameters, engine: &EngineConfig) -> Result<Self> {
        let config = Self { token_pair, params };
        config.validate(engine)?;
        Ok(config)
    }

    /// Re-checks the configuration, e.g. after deserialization.
    ///
    /// # Errors
    ///
    /// Propagates [`CurveParameters::validate`] failures.
    pub fn validate(&self, engine: &EngineConfig) -> Result<()> {
        self.params.validate(engine)
    }

    /// Pooled tokens.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Curve kind and fee.
    #[must_use]
    pub const fn params(&self) -> CurveParameters {
        self.params
    }
}
