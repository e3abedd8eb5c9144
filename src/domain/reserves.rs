//! Pooled token balances.

use serde::{Deserialize, Serialize};

use super::{Amount, SwapDirection};
use crate::error::Result;

/// Balances of token0 and token1 held by a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reserves {
    /// Token0 balance.
    pub reserve0: Amount,
    /// Token1 balance.
    pub reserve1: Amount,
}

impl Reserves {
    /// Creates reserves from two balances.
    #[must_use]
    pub const fn new(reserve0: Amount, reserve1: Amount) -> Self {
        Self { reserve0, reserve1 }
    }

    /// `(reserve_in, reserve_out)` for a swap direction.
    #[must_use]
    pub const fn oriented(&self, direction: SwapDirection) -> (Amount, Amount) {
        match direction {
            SwapDirection::ZeroForOne => (self.reserve0, self.reserve1),
            SwapDirection::OneForZero => (self.reserve1, self.reserve0),
        }
    }

    /// Returns `true` if either side is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve0.is_zero() || self.reserve1.is_zero()
    }

    /// Adds both amounts.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if a
    /// balance exceeds `u128`.
    pub fn deposit(&mut self, amount0: Amount, amount1: Amount) -> Result<()> {
        self.reserve0 = self.reserve0.checked_add(amount0, "reserve0 deposit")?;
        self.reserve1 = self.reserve1.checked_add(amount1, "reserve1 deposit")?;
        Ok(())
    }

    /// Removes both amounts.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) if a
    /// balance would go negative.
    pub fn withdraw(&mut self, amount0: Amount, amount1: Amount) -> Result<()> {
        self.reserve0 = self.reserve0.checked_sub(amount0, "reserve0 withdrawal")?;
        self.reserve1 = self.reserve1.checked_sub(amount1, "reserve1 withdrawal")?;
        Ok(())
    }

    /// Books a swap: `amount_in` joins the input side, `amount_out` leaves
    /// the output side.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`](crate::error::AmmError::Overflow) on
    /// overflow or if the output exceeds the balance.
    pub fn settle_swap(
        &mut self,
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<()> {
        match direction {
            SwapDirection::ZeroForOne => {
                self.reserve0 = self.reserve0.checked_add(amount_in, "reserve0 swap in")?;
                self.reserve1 = self.reserve1.checked_sub(amount_out, "reserve1 swap out")?;
            }
            SwapDirection::OneForZero => {
                self.reserve1 = self.reserve1.checked_add(amount_in, "reserve1 swap in")?;
                self.reserve0 = self.reserve0.checked_sub(amount_out, "reserve0 swap out")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_moves_both_sides() {
        let mut reserves = Reserves::new(Amount::new(100), Amount::new(100));
        assert!(reserves
            .settle_swap(SwapDirection::OneForZero, Amount::new(10), Amount::new(9))
            .is_ok());
        assert_eq!(reserves, Reserves::new(Amount::new(91), Amount::new(110)));
        assert_eq!(
            reserves.oriented(SwapDirection::OneForZero),
            (Amount::new(110), Amount::new(91))
        );
    }

    #[test]
    fn overdraw_fails() {
        let mut reserves = Reserves::new(Amount::new(1), Amount::new(1));
        assert!(reserves.withdraw(Amount::new(2), Amount::ZERO).is_err());
    }
}
