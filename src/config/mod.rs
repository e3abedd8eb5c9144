//! Immutable configuration, validated once at pool construction.
//!
//! [`EngineConfig`] carries the limits shared by every pool (fee ceiling,
//! Newton iteration cap, tick domain). Per-pool configs are checked against
//! it and wrapped in [`PoolConfig`] for the factory.

mod concentrated;
mod curve;
mod curve_pool;
mod engine;
mod pool_config;

pub use concentrated::{ConcentratedConfig, MAX_TICK_SPACING};
pub use curve::{CurveKind, CurveParameters, WEIGHT_TOTAL};
pub use curve_pool::CurvePoolConfig;
pub use engine::{EngineConfig, TickBounds};
pub use pool_config::PoolConfig;
