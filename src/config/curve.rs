//! Reserve-curve selection and constants.

use serde::{Deserialize, Serialize};

use super::EngineConfig;
use crate::domain::BasisPoints;
use crate::error::{AmmError, Result};

/// Required sum of a weighted pool's two weights.
pub const WEIGHT_TOTAL: u32 = 100;

/// Which invariant a reserve pool holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    /// `x * y = k`.
    ConstantProduct,
    /// Amplified-sum invariant for pegged assets.
    Stable {
        /// Amplification coefficient `A`.
        amplification: u32,
    },
    /// `x^w0 * y^w1 = k`.
    Weighted {
        /// Weight of token0.
        weight0: u32,
        /// Weight of token1.
        weight1: u32,
    },
}

/// Curve kind plus swap fee, fixed at pool creation.
///
/// # Examples
///
/// ```
/// use tick_amm::config::{CurveKind, CurveParameters, EngineConfig};
/// use tick_amm::domain::BasisPoints;
///
/// let engine = EngineConfig::default();
/// let weighted = CurveParameters::new(
///     CurveKind::Weighted { weight0: 80, weight1: 20 },
///     BasisPoints::new(30),
///     &engine,
/// );
/// assert!(weighted.is_ok());
///
/// let lopsided = CurveParameters::new(
///     CurveKind::Weighted { weight0: 80, weight1: 30 },
///     BasisPoints::new(30),
///     &engine,
/// );
/// assert!(lopsided.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParameters {
    kind: CurveKind,
    fee: BasisPoints,
}

impl CurveParameters {
    /// Creates and validates parameters.
    ///
    /// # Errors
    ///
    /// See [`CurveParameters::validate`].
    pub fn new(kind: CurveKind, fee: BasisPoints, engine: &EngineConfig) -> Result<Self> {
        let params = Self { kind, fee };
        params.validate(engine)?;
        Ok(params)
    }

    /// Checks the parameters against engine limits.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidSwapFee`] if the fee exceeds the engine ceiling.
    /// - [`AmmError::InvalidConfiguration`] for an amplification of zero or
    ///   above the engine ceiling.
    /// - [`AmmError::InvalidWeights`] unless both weights are positive and
    ///   sum to [`WEIGHT_TOTAL`].
    pub fn validate(&self, engine: &EngineConfig) -> Result<()> {
        if self.fee > engine.max_fee() {
            return Err(AmmError::InvalidSwapFee {
                fee: self.fee.get(),
                max: engine.max_fee().get(),
            });
        }
        match self.kind {
            CurveKind::ConstantProduct => Ok(()),
            CurveKind::Stable { amplification } => {
                if amplification == 0 || amplification > engine.max_amplification() {
                    return Err(AmmError::InvalidConfiguration(
                        "amplification must be in 1..=max_amplification",
                    ));
                }
                Ok(())
            }
            CurveKind::Weighted { weight0, weight1 } => {
                if weight0 == 0 || weight1 == 0 || weight0.checked_add(weight1) != Some(WEIGHT_TOTAL)
                {
                    return Err(AmmError::InvalidWeights {
                        weight0,
                        weight1,
                        expected_total: WEIGHT_TOTAL,
                    });
                }
                Ok(())
            }
        }
    }

    /// Curve kind.
    #[must_use]
    pub const fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }
}
