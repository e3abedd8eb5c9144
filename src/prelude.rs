//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use tick_amm::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, BasisPoints, BurnReceipt, Decimals, FeeCollection, FeeTier, Liquidity,
    MintReceipt, PoolCounters, Reserves, Rounding, SqrtPrice, SwapCompletion, SwapDirection,
    SwapLimit, SwapReceipt, SwapRequest, Tick, TickCrossing, TickRange, Token, TokenPair,
};

pub use crate::traits::{BalanceVault, FromConfig, LiquidityPool, SwapPool};

pub use crate::config::{
    ConcentratedConfig, CurveKind, CurveParameters, CurvePoolConfig, EngineConfig, PoolConfig,
    TickBounds,
};

pub use crate::curves::{CurveStrategy, Invariant};

pub use crate::concentrated::{LiquidityAccounting, Position, SwapStepper, TickLedger};

pub use crate::pools::{
    ConcentratedPool, CurvePool, PoolBox, RangeDeposit, RangeWithdrawal, ShareDeposit,
    ShareWithdrawal,
};

pub use crate::factory::DefaultPoolFactory;

pub use crate::error::{AmmError, Result};
