//! Token amounts across a sqrt-price interval, and price movement caused by
//! an input amount.
//!
//! With liquidity `L` over `[sqrt_a, sqrt_b]` (Q64.96):
//!
//! ```text
//! amount0 = L * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)
//! amount1 = L * (sqrt_b - sqrt_a)
//! ```

use primitive_types::U256;

use super::full_math::{div_rounding_up, mul_div, mul_div_rounded, mul_div_rounding_up};
use super::tick_math::{q96, RESOLUTION};
use crate::domain::Rounding;
use crate::error::{AmmError, Result};

#[inline]
fn ordered(a: U256, b: U256) -> (U256, U256) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Token0 needed to move `liquidity` between two sqrt prices.
///
/// # Errors
///
/// - [`AmmError::InvalidPrice`] if the lower sqrt price is zero.
/// - [`AmmError::Overflow`] if the amount exceeds 256 bits.
pub fn amount0_delta(
    sqrt_a: U256,
    sqrt_b: U256,
    liquidity: u128,
    rounding: Rounding,
) -> Result<U256> {
    let (lower, upper) = ordered(sqrt_a, sqrt_b);
    if lower.is_zero() {
        return Err(AmmError::InvalidPrice("sqrt price must be positive"));
    }
    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = upper - lower;
    match rounding {
        Rounding::Up => div_rounding_up(mul_div_rounding_up(numerator1, numerator2, upper)?, lower),
        Rounding::Down => Ok(mul_div(numerator1, numerator2, upper)? / lower),
    }
}

/// Token1 needed to move `liquidity` between two sqrt prices.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] if the amount exceeds 256 bits.
pub fn amount1_delta(
    sqrt_a: U256,
    sqrt_b: U256,
    liquidity: u128,
    rounding: Rounding,
) -> Result<U256> {
    let (lower, upper) = ordered(sqrt_a, sqrt_b);
    mul_div_rounded(U256::from(liquidity), upper - lower, q96(), rounding)
}

/// Sqrt price after adding or removing `amount` of token0, rounded up.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if removing more token0 than the
///   liquidity holds.
/// - [`AmmError::Overflow`] on arithmetic overflow.
pub fn next_sqrt_price_from_amount0_rounding_up(
    sqrt_price: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256> {
    if amount.is_zero() {
        return Ok(sqrt_price);
    }
    let numerator1 = U256::from(liquidity) << RESOLUTION;

    if add {
        if let Some(product) = amount.checked_mul(sqrt_price) {
            if let Some(denominator) = numerator1.checked_add(product) {
                return mul_div_rounding_up(numerator1, sqrt_price, denominator);
            }
        }
        let denominator = (numerator1 / sqrt_price)
            .checked_add(amount)
            .ok_or(AmmError::Overflow("token0 price denominator"))?;
        return div_rounding_up(numerator1, denominator);
    }

    let product = amount
        .checked_mul(sqrt_price)
        .ok_or(AmmError::Overflow("token0 price product"))?;
    if numerator1 <= product {
        return Err(AmmError::InsufficientLiquidity {
            reason: "token0 removal exceeds liquidity",
            available: U256::from(liquidity),
        });
    }
    mul_div_rounding_up(numerator1, sqrt_price, numerator1 - product)
}

/// Sqrt price after adding or removing `amount` of token1, rounded down.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `liquidity` is zero.
/// - [`AmmError::InsufficientLiquidity`] if removing more token1 than the
///   price allows.
/// - [`AmmError::Overflow`] on arithmetic overflow.
pub fn next_sqrt_price_from_amount1_rounding_down(
    sqrt_price: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256> {
    let liquidity = U256::from(liquidity);
    if add {
        let quotient = mul_div(amount, q96(), liquidity)?;
        return sqrt_price
            .checked_add(quotient)
            .ok_or(AmmError::Overflow("token1 price sum"));
    }
    let quotient = mul_div_rounding_up(amount, q96(), liquidity)?;
    if sqrt_price <= quotient {
        return Err(AmmError::InsufficientLiquidity {
            reason: "token1 removal exceeds liquidity",
            available: U256::from(liquidity),
        });
    }
    Ok(sqrt_price - quotient)
}

/// Sqrt price after swapping `amount_in` into the pool.
///
/// Selling token0 (`zero_for_one`) lowers the price; selling token1 raises
/// it. Rounding always favours the pool.
///
/// # Errors
///
/// - [`AmmError::InvalidPrice`] if `sqrt_price` is zero.
/// - [`AmmError::InsufficientLiquidity`] if `liquidity` is zero.
/// - Errors propagated from the directional helpers.
pub fn next_sqrt_price_from_input(
    sqrt_price: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256> {
    if sqrt_price.is_zero() {
        return Err(AmmError::InvalidPrice("sqrt price must be positive"));
    }
    if liquidity == 0 {
        return Err(AmmError::InsufficientLiquidity {
            reason: "no liquidity to move the price",
            available: U256::zero(),
        });
    }
    if zero_for_one {
        next_sqrt_price_from_amount0_rounding_up(sqrt_price, liquidity, amount_in, true)
    } else {
        next_sqrt_price_from_amount1_rounding_down(sqrt_price, liquidity, amount_in, true)
    }
}
