//! Default pool factory implementation.

use crate::config::{EngineConfig, PoolConfig};
use crate::error::Result;
use crate::pools::{ConcentratedPool, CurvePool, PoolBox};
use crate::traits::FromConfig;

/// Stateless factory turning a [`PoolConfig`] into a [`PoolBox`].
///
/// # Example
///
/// ```rust
/// use tick_amm::config::{ConcentratedConfig, EngineConfig, PoolConfig};
/// use tick_amm::domain::{Address, Decimals, FeeTier, SqrtPrice, Token, TokenPair};
/// use tick_amm::factory::DefaultPoolFactory;
/// use tick_amm::traits::SwapPool;
///
/// let engine = EngineConfig::default();
/// let pair = TokenPair::new(
///     Token::new(Address::from_bytes([1u8; 32]), Decimals::MAX),
///     Token::new(Address::from_bytes([2u8; 32]), Decimals::MAX),
/// )
/// .expect("distinct");
/// let config = ConcentratedConfig::new(pair, FeeTier::MEDIUM, SqrtPrice::unit(), &engine)
///     .expect("valid");
///
/// let pool = DefaultPoolFactory::create(&PoolConfig::Concentrated(config), &engine)
///     .expect("pool created");
/// assert_eq!(*pool.token_pair(), pair);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultPoolFactory;

impl DefaultPoolFactory {
    /// Validates `config` against `engine` and builds the pool it names.
    ///
    /// # Errors
    ///
    /// - Any [`EngineConfig::validate`] or [`PoolConfig::validate`] error.
    /// - Any error from the pool's [`FromConfig`] implementation.
    pub fn create(config: &PoolConfig, engine: &EngineConfig) -> Result<PoolBox> {
        engine.validate()?;
        config.validate(engine)?;

        match config {
            PoolConfig::Curve(cfg) => CurvePool::from_config(cfg, engine).map(PoolBox::from),
            PoolConfig::Concentrated(cfg) => {
                ConcentratedPool::from_config(cfg, engine).map(PoolBox::from)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{ConcentratedConfig, CurveKind, CurveParameters, CurvePoolConfig};
    use crate::domain::{Address, BasisPoints, Decimals, FeeTier, SqrtPrice, Token, TokenPair};
    use crate::error::AmmError;
    use crate::traits::SwapPool;

    fn pair() -> TokenPair {
        let Ok(pair) = TokenPair::new(
            Token::new(Address::from_bytes([1; 32]), Decimals::MAX),
            Token::new(Address::from_bytes([2; 32]), Decimals::MAX),
        ) else {
            panic!("distinct tokens");
        };
        pair
    }

    #[test]
    fn builds_each_variant() {
        let engine = EngineConfig::default();
        let Ok(params) = CurveParameters::new(
            CurveKind::Weighted {
                weight0: 80,
                weight1: 20,
            },
            BasisPoints::new(30),
            &engine,
        ) else {
            panic!("valid params");
        };
        let Ok(curve) = CurvePoolConfig::new(pair(), params, &engine) else {
            panic!("valid config");
        };
        let Ok(concentrated) = ConcentratedConfig::new(pair(), FeeTier::HIGH, SqrtPrice::unit(), &engine)
        else {
            panic!("valid config");
        };

        let Ok(curve_pool) = DefaultPoolFactory::create(&curve.into(), &engine) else {
            panic!("curve pool");
        };
        let Ok(tick_pool) = DefaultPoolFactory::create(&concentrated.into(), &engine) else {
            panic!("concentrated pool");
        };
        assert!(curve_pool.as_curve().is_some());
        assert!(tick_pool.as_concentrated().is_some());
        assert_eq!(tick_pool.fee(), BasisPoints::new(100));
    }

    #[test]
    fn config_is_checked_against_the_engine_it_is_built_with() {
        let permissive = EngineConfig::default();
        let Ok(params) = CurveParameters::new(CurveKind::ConstantProduct, BasisPoints::new(500), &permissive)
        else {
            panic!("valid under the default ceiling");
        };
        let Ok(config) = CurvePoolConfig::new(pair(), params, &permissive) else {
            panic!("valid config");
        };
        let strict = EngineConfig::default().with_max_fee(BasisPoints::new(100));
        assert_eq!(
            DefaultPoolFactory::create(&config.into(), &strict),
            Err(AmmError::InvalidSwapFee { fee: 500, max: 100 })
        );
    }
}
