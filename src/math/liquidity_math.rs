//! Conversions between liquidity units and token amounts for a range.

use primitive_types::U256;

use super::cast::SafeCast;
use super::full_math::mul_div;
use super::sqrt_price_math::{amount0_delta, amount1_delta};
use super::tick_math::q96;
use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// Applies a signed delta to an unsigned liquidity value.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if the delta would go below zero.
/// - [`AmmError::Overflow`] if the sum exceeds `u128`.
pub fn add_delta(liquidity: u128, delta: i128) -> Result<u128> {
    if delta < 0 {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(AmmError::InsufficientLiquidity {
                reason: "liquidity delta below zero",
                available: U256::from(liquidity),
            })
    } else {
        liquidity
            .checked_add(delta.unsigned_abs())
            .ok_or(AmmError::Overflow("liquidity delta above u128"))
    }
}

/// Token amounts represented by `liquidity` over `[sqrt_lower, sqrt_upper)`
/// when the pool sits at `sqrt_price`.
///
/// Below the range the position is all token0, above it all token1, and
/// inside it a mix split at the current price.
///
/// # Errors
///
/// Propagates [`amount0_delta`] and [`amount1_delta`] failures.
pub fn amounts_for_liquidity(
    sqrt_price: U256,
    sqrt_lower: U256,
    sqrt_upper: U256,
    liquidity: u128,
    rounding: Rounding,
) -> Result<(U256, U256)> {
    if sqrt_price <= sqrt_lower {
        Ok((
            amount0_delta(sqrt_lower, sqrt_upper, liquidity, rounding)?,
            U256::zero(),
        ))
    } else if sqrt_price < sqrt_upper {
        Ok((
            amount0_delta(sqrt_price, sqrt_upper, liquidity, rounding)?,
            amount1_delta(sqrt_lower, sqrt_price, liquidity, rounding)?,
        ))
    } else {
        Ok((
            U256::zero(),
            amount1_delta(sqrt_lower, sqrt_upper, liquidity, rounding)?,
        ))
    }
}

fn liquidity_for_amount0(sqrt_lower: U256, sqrt_upper: U256, amount0: u128) -> Result<U256> {
    let intermediate = mul_div(sqrt_lower, sqrt_upper, q96())?;
    mul_div(U256::from(amount0), intermediate, sqrt_upper - sqrt_lower)
}

fn liquidity_for_amount1(sqrt_lower: U256, sqrt_upper: U256, amount1: u128) -> Result<U256> {
    mul_div(U256::from(amount1), q96(), sqrt_upper - sqrt_lower)
}

/// Largest liquidity that `amount0` and `amount1` can fund over
/// `[sqrt_lower, sqrt_upper)` at `sqrt_price`.
///
/// # Errors
///
/// - [`AmmError::InvalidPrice`] if `sqrt_lower >= sqrt_upper`.
/// - [`AmmError::CastOverflow`] if the liquidity exceeds `u128`.
pub fn liquidity_for_amounts(
    sqrt_price: U256,
    sqrt_lower: U256,
    sqrt_upper: U256,
    amount0: u128,
    amount1: u128,
) -> Result<u128> {
    if sqrt_lower >= sqrt_upper {
        return Err(AmmError::InvalidPrice("range bounds must be ascending"));
    }
    let liquidity = if sqrt_price <= sqrt_lower {
        liquidity_for_amount0(sqrt_lower, sqrt_upper, amount0)?
    } else if sqrt_price < sqrt_upper {
        let from0 = liquidity_for_amount0(sqrt_price, sqrt_upper, amount0)?;
        let from1 = liquidity_for_amount1(sqrt_lower, sqrt_price, amount1)?;
        from0.min(from1)
    } else {
        liquidity_for_amount1(sqrt_lower, sqrt_upper, amount1)?
    };
    liquidity.safe_cast()
}
