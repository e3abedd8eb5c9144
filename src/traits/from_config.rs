//! Construction from validated configuration.
//!
//! Each pool implements `FromConfig<C>` for its own config type; there is
//! no blanket implementation. The factory dispatches on
//! [`PoolConfig`](crate::config::PoolConfig):
//!
//! ```text
//! PoolConfig::Curve(cfg)        => CurvePool::from_config(&cfg, &engine)
//! PoolConfig::Concentrated(cfg) => ConcentratedPool::from_config(&cfg, &engine)
//! ```

use crate::config::EngineConfig;
use crate::error::Result;

/// Builds a pool from its configuration and the engine limits.
pub trait FromConfig<C> {
    /// Validates `config` against `engine` and returns a pool in its
    /// initial state.
    ///
    /// # Errors
    ///
    /// Any validation error of `config` or `engine`.
    fn from_config(config: &C, engine: &EngineConfig) -> Result<Self>
    where
        Self: Sized;
}
