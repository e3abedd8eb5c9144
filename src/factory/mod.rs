//! Pool instantiation via the factory pattern.
//!
//! [`DefaultPoolFactory`] validates a [`PoolConfig`] against an
//! [`EngineConfig`] and dispatches to the matching pool constructor.
//!
//! [`PoolConfig`]: crate::config::PoolConfig
//! [`EngineConfig`]: crate::config::EngineConfig

mod default_factory;

pub use default_factory::DefaultPoolFactory;
