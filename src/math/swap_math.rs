//! One segment of a concentrated-liquidity swap.

use primitive_types::U256;

use super::full_math::{mul_div, mul_div_rounding_up};
use super::sqrt_price_math::{amount0_delta, amount1_delta, next_sqrt_price_from_input};
use crate::domain::{BasisPoints, Rounding};
use crate::error::{AmmError, Result};

/// Result of swapping within a single price segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapStep {
    /// Sqrt price at the end of the segment.
    pub sqrt_price_next: U256,
    /// Input consumed, excluding the fee.
    pub amount_in: U256,
    /// Output produced.
    pub amount_out: U256,
    /// Fee charged on the input.
    pub fee_amount: U256,
}

impl SwapStep {
    /// Returns `true` if the segment ended on its target price.
    #[must_use]
    pub fn reached(&self, target: U256) -> bool {
        self.sqrt_price_next == target
    }
}

/// Swaps as much of `amount_remaining` as fits between `sqrt_current` and
/// `sqrt_target` at constant `liquidity`.
///
/// The fee is taken from the input before it moves the price. When the
/// target is reached the fee is charged on the consumed input; otherwise the
/// whole unused remainder is the fee, so a step that does not reach its
/// target always exhausts the input.
///
/// With zero liquidity the price jumps to the target and nothing is
/// consumed.
///
/// # Errors
///
/// - [`AmmError::InvalidSwapFee`] if `fee` is 100% or more.
/// - Errors propagated from the sqrt-price helpers.
pub fn compute_swap_step(
    sqrt_current: U256,
    sqrt_target: U256,
    liquidity: u128,
    amount_remaining: U256,
    fee: BasisPoints,
) -> Result<SwapStep> {
    let denominator = U256::from(BasisPoints::DENOMINATOR);
    let fee_bps = U256::from(fee.get());
    if fee_bps >= denominator {
        return Err(AmmError::InvalidSwapFee {
            fee: fee.get(),
            max: BasisPoints::DENOMINATOR - 1,
        });
    }
    let zero_for_one = sqrt_current >= sqrt_target;

    let remaining_less_fee = mul_div(amount_remaining, denominator - fee_bps, denominator)?;
    let max_in = if zero_for_one {
        amount0_delta(sqrt_target, sqrt_current, liquidity, Rounding::Up)?
    } else {
        amount1_delta(sqrt_current, sqrt_target, liquidity, Rounding::Up)?
    };

    let sqrt_price_next = if remaining_less_fee >= max_in {
        sqrt_target
    } else {
        next_sqrt_price_from_input(sqrt_current, liquidity, remaining_less_fee, zero_for_one)?
    };
    let reached = sqrt_price_next == sqrt_target;

    let (amount_in, amount_out) = if zero_for_one {
        let amount_in = if reached {
            max_in
        } else {
            amount0_delta(sqrt_price_next, sqrt_current, liquidity, Rounding::Up)?
        };
        let amount_out = amount1_delta(sqrt_price_next, sqrt_current, liquidity, Rounding::Down)?;
        (amount_in, amount_out)
    } else {
        let amount_in = if reached {
            max_in
        } else {
            amount1_delta(sqrt_current, sqrt_price_next, liquidity, Rounding::Up)?
        };
        let amount_out = amount0_delta(sqrt_current, sqrt_price_next, liquidity, Rounding::Down)?;
        (amount_in, amount_out)
    };

    let fee_amount = if reached {
        mul_div_rounding_up(amount_in, fee_bps, denominator - fee_bps)?
    } else {
        amount_remaining
            .checked_sub(amount_in)
            .ok_or(AmmError::Overflow("swap step consumed more than remaining"))?
    };

    Ok(SwapStep {
        sqrt_price_next,
        amount_in,
        amount_out,
        fee_amount,
    })
}
