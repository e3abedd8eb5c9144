//! Swap requests.

use serde::{Deserialize, Serialize};

use super::{Address, Amount, SqrtPrice};
use crate::error::{AmmError, Result};

/// Which token the caller sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Sell token0 for token1; the price falls.
    ZeroForOne,
    /// Sell token1 for token0; the price rises.
    OneForZero,
}

impl SwapDirection {
    /// Returns `true` for [`SwapDirection::ZeroForOne`].
    #[must_use]
    pub const fn is_zero_for_one(&self) -> bool {
        matches!(self, Self::ZeroForOne)
    }
}

/// How far a swap is allowed to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SwapLimit {
    /// Fill the whole input at any price.
    #[default]
    None,
    /// Abort with [`AmmError::SlippageExceeded`] unless at least this much
    /// output is produced.
    MinimumOut(Amount),
    /// Stop once the pool price reaches this sqrt price; any unspent input
    /// is returned as a partial fill. Concentrated pools only.
    SqrtPrice(SqrtPrice),
}

/// A swap of an exact input amount.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::{Address, Amount, SwapDirection, SwapLimit, SwapRequest};
///
/// let request = SwapRequest::new(Amount::new(1_000), SwapDirection::ZeroForOne, Address::zero())
///     .with_limit(SwapLimit::MinimumOut(Amount::new(990)));
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Input amount, fee included.
    pub amount_in: Amount,
    /// Token sold.
    pub direction: SwapDirection,
    /// Who receives the output.
    pub recipient: Address,
    /// Price or slippage bound.
    pub limit: SwapLimit,
}

impl SwapRequest {
    /// Unbounded request.
    #[must_use]
    pub const fn new(amount_in: Amount, direction: SwapDirection, recipient: Address) -> Self {
        Self {
            amount_in,
            direction,
            recipient,
            limit: SwapLimit::None,
        }
    }

    /// Replaces the limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: SwapLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Checks the request in isolation.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientInput`] for a zero input.
    pub const fn validate(&self) -> Result<()> {
        if self.amount_in.is_zero() {
            return Err(AmmError::InsufficientInput {
                reason: "swap input must be positive",
                amount: 0,
            });
        }
        Ok(())
    }

    /// Enforces a [`SwapLimit::MinimumOut`] bound against `amount_out`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::SlippageExceeded`] if the output falls short.
    pub const fn check_minimum_out(&self, amount_out: Amount) -> Result<()> {
        if let SwapLimit::MinimumOut(minimum) = self.limit {
            if amount_out.get() < minimum.get() {
                return Err(AmmError::SlippageExceeded {
                    minimum: minimum.get(),
                    actual: amount_out.get(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_input_rejected() {
        let request = SwapRequest::new(Amount::ZERO, SwapDirection::OneForZero, Address::zero());
        assert!(matches!(
            request.validate(),
            Err(AmmError::InsufficientInput { .. })
        ));
    }

    #[test]
    fn minimum_out_enforced() {
        let request = SwapRequest::new(Amount::new(10), SwapDirection::ZeroForOne, Address::zero())
            .with_limit(SwapLimit::MinimumOut(Amount::new(9)));
        assert!(request.check_minimum_out(Amount::new(9)).is_ok());
        assert_eq!(
            request.check_minimum_out(Amount::new(8)),
            Err(AmmError::SlippageExceeded { minimum: 9, actual: 8 })
        );
    }

    #[test]
    fn direction_flags() {
        assert!(SwapDirection::ZeroForOne.is_zero_for_one());
        assert!(!SwapDirection::OneForZero.is_zero_for_one());
    }
}
