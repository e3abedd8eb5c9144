//! Cumulative per-pool statistics.

use serde::{Deserialize, Serialize};

use super::{Amount, SwapDirection};
use crate::error::{AmmError, Result};

/// Running totals for off-chain consumers.
///
/// Volumes count every unit that entered or left the pool through swaps;
/// fees are in the input token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolCounters {
    /// Swaps committed.
    pub swaps: u64,
    /// Token0 traded.
    pub volume0: u128,
    /// Token1 traded.
    pub volume1: u128,
    /// Fees charged in token0.
    pub fees0: u128,
    /// Fees charged in token1.
    pub fees1: u128,
}

impl PoolCounters {
    /// Books one swap.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if a total exceeds its width.
    pub fn record_swap(
        &mut self,
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> Result<()> {
        let (volume_in, volume_out, fees) = match direction {
            SwapDirection::ZeroForOne => (&mut self.volume0, &mut self.volume1, &mut self.fees0),
            SwapDirection::OneForZero => (&mut self.volume1, &mut self.volume0, &mut self.fees1),
        };
        *volume_in = volume_in
            .checked_add(amount_in.get())
            .ok_or(AmmError::Overflow("input volume counter"))?;
        *volume_out = volume_out
            .checked_add(amount_out.get())
            .ok_or(AmmError::Overflow("output volume counter"))?;
        *fees = fees
            .checked_add(fee.get())
            .ok_or(AmmError::Overflow("fee counter"))?;
        self.swaps = self
            .swaps
            .checked_add(1)
            .ok_or(AmmError::Overflow("swap counter"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn books_both_legs() {
        let mut counters = PoolCounters::default();
        assert!(counters
            .record_swap(SwapDirection::OneForZero, Amount::new(100), Amount::new(95), Amount::new(1))
            .is_ok());
        assert_eq!(
            counters,
            PoolCounters {
                swaps: 1,
                volume0: 95,
                volume1: 100,
                fees0: 0,
                fees1: 1,
            }
        );
    }

    #[test]
    fn overflow_is_reported() {
        let mut counters = PoolCounters {
            volume0: u128::MAX,
            ..PoolCounters::default()
        };
        assert!(counters
            .record_swap(SwapDirection::ZeroForOne, Amount::new(1), Amount::ZERO, Amount::ZERO)
            .is_err());
    }
}
