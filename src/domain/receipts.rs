//! Settlement receipts returned by pool operations.
//!
//! The engine never moves tokens. Each receipt carries what the caller
//! needs to settle against its own balance ledger: who receives what, and
//! how much the pool took in.

use serde::{Deserialize, Serialize};

use super::{Address, Amount, Liquidity, SqrtPrice, SwapDirection, Tick};
use crate::error::{AmmError, Result};

/// One tick boundary crossed during a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCrossing {
    /// Tick crossed.
    pub tick: Tick,
    /// Net liquidity of the tick as stored (upward sign convention).
    pub liquidity_net: i128,
    /// Active liquidity after the crossing.
    pub active_liquidity: Liquidity,
}

/// How a swap ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapCompletion {
    /// All input was consumed.
    Filled,
    /// The sqrt price limit was reached first; `unfilled` input was not
    /// taken from the caller.
    PriceLimitReached {
        /// Input left over.
        unfilled: Amount,
    },
}

/// Outcome of a committed swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapReceipt {
    /// Output recipient.
    pub recipient: Address,
    /// Token sold.
    pub direction: SwapDirection,
    /// Input taken by the pool, fee included.
    pub amount_in: Amount,
    /// Output paid to the recipient.
    pub amount_out: Amount,
    /// Part of `amount_in` charged as fee.
    pub fee: Amount,
    /// Ticks crossed, in the order the price crossed them.
    pub crossings: Vec<TickCrossing>,
    /// Pool sqrt price after the swap, for concentrated pools.
    pub sqrt_price: Option<SqrtPrice>,
    /// Fill status.
    pub completion: SwapCompletion,
}

impl SwapReceipt {
    /// Returns `true` if all input was consumed.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        matches!(self.completion, SwapCompletion::Filled)
    }

    /// Turns a partial fill into [`AmmError::PriceLimitReached`].
    ///
    /// The pool state stays committed either way; this only changes how the
    /// caller observes the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PriceLimitReached`] carrying the partial amounts.
    pub fn require_filled(self) -> Result<Self> {
        match self.completion {
            SwapCompletion::Filled => Ok(self),
            SwapCompletion::PriceLimitReached { .. } => Err(AmmError::PriceLimitReached {
                amount_in: self.amount_in.get(),
                amount_out: self.amount_out.get(),
            }),
        }
    }
}

/// Outcome of adding liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintReceipt {
    /// Owner credited with the new liquidity or shares.
    pub recipient: Address,
    /// Liquidity units (concentrated) or pool shares (reserve curves).
    pub minted: Liquidity,
    /// Token0 the caller owes the pool.
    pub amount0: Amount,
    /// Token1 the caller owes the pool.
    pub amount1: Amount,
}

/// Outcome of removing liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnReceipt {
    /// Who receives the withdrawn tokens.
    pub recipient: Address,
    /// Liquidity units or shares destroyed.
    pub burned: Liquidity,
    /// Token0 paid out.
    pub amount0: Amount,
    /// Token1 paid out.
    pub amount1: Amount,
}

/// Swap fees paid out to a concentrated position owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeCollection {
    /// Who receives the fees.
    pub recipient: Address,
    /// Token0 fees.
    pub amount0: Amount,
    /// Token1 fees.
    pub amount1: Amount,
}
