//! Core swap trait shared by every pool.
//!
//! [`SwapPool`] covers executing a swap, quoting one without side effects,
//! and the read-only pool identity. Pools are dispatched through the
//! [`PoolBox`](crate::pools::PoolBox) enum, not `dyn` objects.
//!
//! # Atomicity
//!
//! A swap either commits completely or fails with the pool unchanged. A
//! price-limited partial fill on a concentrated pool is a commit, reported
//! through [`SwapReceipt::completion`].

use crate::domain::{
    Amount, BasisPoints, PoolCounters, Reserves, SwapDirection, SwapReceipt, SwapRequest,
    TokenPair,
};
use crate::error::Result;

/// Swap execution and read-only pool state.
pub trait SwapPool {
    /// Executes `request` and returns what the caller must settle.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInput`](crate::error::AmmError::InsufficientInput)
    ///   for a zero input.
    /// - [`AmmError::InsufficientLiquidity`](crate::error::AmmError::InsufficientLiquidity)
    ///   if the pool cannot produce output.
    /// - [`AmmError::SlippageExceeded`](crate::error::AmmError::SlippageExceeded)
    ///   if a minimum output is not met.
    /// - Numeric errors from the pricing math.
    fn swap(&mut self, request: &SwapRequest) -> Result<SwapReceipt>;

    /// Output a swap of `amount_in` would produce right now.
    ///
    /// # Errors
    ///
    /// Same conditions as [`swap`](Self::swap), minus slippage.
    fn quote_amount_out(&self, direction: SwapDirection, amount_in: Amount) -> Result<Amount>;

    /// Ordered token pair.
    #[must_use]
    fn token_pair(&self) -> &TokenPair;

    /// Swap fee.
    #[must_use]
    fn fee(&self) -> BasisPoints;

    /// Token balances held by the pool.
    #[must_use]
    fn reserves(&self) -> Reserves;

    /// Cumulative swap, volume and fee counters.
    #[must_use]
    fn counters(&self) -> &PoolCounters;
}
