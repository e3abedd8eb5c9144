//! Liquidity provision trait extending [`SwapPool`].
//!
//! Reserve-curve pools mint fungible shares against token deposits;
//! concentrated pools mint liquidity over a tick range. The associated
//! [`Deposit`](LiquidityPool::Deposit) and
//! [`Withdrawal`](LiquidityPool::Withdrawal) types carry the
//! pool-specific half of each request.
//!
//! Total liquidity only changes through [`LiquidityPool::mint`] and
//! [`LiquidityPool::burn`].

use super::SwapPool;
use crate::domain::{Address, BurnReceipt, Liquidity, MintReceipt};
use crate::error::Result;

/// Pools that accept and return liquidity.
pub trait LiquidityPool: SwapPool {
    /// What a provider supplies.
    type Deposit;
    /// What a provider redeems.
    type Withdrawal;

    /// Mints liquidity for `recipient`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::SlippageExceeded`](crate::error::AmmError::SlippageExceeded)
    ///   if fewer than `minimum` units would be minted.
    /// - Pool-specific validation errors.
    fn mint(
        &mut self,
        deposit: &Self::Deposit,
        minimum: Liquidity,
        recipient: Address,
    ) -> Result<MintReceipt>;

    /// Burns liquidity and pays the underlying tokens to `recipient`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidityOwned`](crate::error::AmmError::InsufficientLiquidityOwned)
    ///   if the owner holds less than requested.
    /// - Pool-specific validation errors.
    fn burn(&mut self, withdrawal: &Self::Withdrawal, recipient: Address) -> Result<BurnReceipt>;

    /// Total outstanding liquidity: shares for curve pools, active
    /// liquidity for concentrated pools.
    #[must_use]
    fn total_liquidity(&self) -> Liquidity;
}
