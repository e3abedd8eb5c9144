//! External balance vault seam.
//!
//! Pools never hold tokens. The embedding application keeps balances in a
//! vault that represents each token's holdings as shares (`base`) of a
//! growing underlying total (`elastic`), and settles pool receipts against
//! it. The engine defines only the interface.

use crate::domain::{Address, Amount, Rounding};
use crate::error::Result;

/// Share-based token custody.
pub trait BalanceVault {
    /// Shares worth `amount` of `token`.
    ///
    /// # Errors
    ///
    /// Numeric overflow.
    fn to_shares(&self, token: &Address, amount: Amount, rounding: Rounding) -> Result<Amount>;

    /// Underlying amount of `shares` of `token`.
    ///
    /// # Errors
    ///
    /// Numeric overflow.
    fn to_amount(&self, token: &Address, shares: Amount, rounding: Rounding) -> Result<Amount>;

    /// Credits `owner` with shares for `amount` deposited; returns the
    /// shares minted.
    ///
    /// # Errors
    ///
    /// Numeric overflow or an implementation-specific refusal.
    fn deposit(&mut self, token: &Address, owner: &Address, amount: Amount) -> Result<Amount>;

    /// Debits `owner` for `amount` withdrawn; returns the shares burned.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidityOwned`](crate::error::AmmError::InsufficientLiquidityOwned)
    /// if `owner` holds too few shares.
    fn withdraw(&mut self, token: &Address, owner: &Address, amount: Amount) -> Result<Amount>;

    /// Moves `shares` of `token` between owners.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidityOwned`](crate::error::AmmError::InsufficientLiquidityOwned)
    /// if `from` holds too few shares.
    fn transfer(&mut self, token: &Address, from: &Address, to: &Address, shares: Amount)
        -> Result<()>;

    /// Shares of `token` held by `owner`.
    #[must_use]
    fn balance_of(&self, token: &Address, owner: &Address) -> Amount;
}
