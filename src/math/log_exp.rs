//! Fixed-point natural logarithm, exponential, and power.
//!
//! Values are unsigned Q1.127 numbers held in a [`U256`]: the real number
//! `v` is represented by `v * 2^127`. All algorithms are table-free:
//!
//! - [`general_log`] extracts the integer part of `log2(x)` from the most
//!   significant bit, then produces one fractional bit per repeated squaring
//!   of the normalized residual.
//! - [`optimal_log`] evaluates `2 * atanh((x - 1) / (x + 1))` as a power
//!   series on a residual in `[1, 2)`, and [`ln`] combines it with the
//!   integer `log2` part.
//! - [`optimal_exp`] reduces the argument by multiples of `ln 2` and sums
//!   the Taylor series of the residual.
//! - [`power`] chains [`general_log`] and [`optimal_exp`].
//!
//! Series terms are summed until they vanish at 127-bit precision, so the
//! relative error of every function is far below `1e-6` over its domain.

use primitive_types::U256;

use super::full_math::mul_div;
use crate::error::{AmmError, Result};

/// Number of fractional bits.
pub const PRECISION: u32 = 127;

/// `1.0` in Q1.127.
pub const FIXED_ONE: u128 = 1 << PRECISION;

/// `ln 2` in Q1.127.
pub const LN2: u128 = 117_932_881_612_756_647_068_972_071_382_077_242_199;

/// Largest accepted [`optimal_exp`] argument, as a whole number.
pub const MAX_EXP_ARGUMENT: u32 = 88;

#[inline]
fn one() -> U256 {
    U256::from(FIXED_ONE)
}

#[inline]
fn two() -> U256 {
    U256::from(FIXED_ONE) << 1
}

/// Position of the most significant set bit; `x` must be non-zero.
#[inline]
fn floor_log2(x: U256) -> usize {
    x.bits() - 1
}

fn ensure_log_domain(function: &'static str, x: U256) -> Result<()> {
    if x < one() {
        return Err(AmmError::InvalidDomain {
            function,
            argument: x,
        });
    }
    Ok(())
}

/// Natural logarithm by bit decomposition.
///
/// Domain: `x >= 1.0`. Any such `x` representable in 256 bits is accepted.
///
/// # Errors
///
/// Returns [`AmmError::InvalidDomain`] if `x < 1.0`.
pub fn general_log(x: U256) -> Result<U256> {
    ensure_log_domain("general_log", x)?;
    let mut x = x;
    let mut log2 = U256::zero();

    if x >= two() {
        let count = floor_log2(x / one());
        x = x >> count;
        log2 = U256::from(count) << PRECISION;
    }

    if x > one() {
        for bit in (0..PRECISION).rev() {
            // x < 2^128 so the square stays below 2^256
            x = (x * x) >> PRECISION;
            if x >= two() {
                x = x >> 1u32;
                log2 = log2 | (U256::one() << bit);
            }
        }
    }

    mul_div(log2, U256::from(LN2), one())
}

/// Natural logarithm of a residual in `[1.0, 2.0)` by the `atanh` series.
///
/// # Errors
///
/// Returns [`AmmError::InvalidDomain`] if `x` lies outside `[1.0, 2.0)`.
pub fn optimal_log(x: U256) -> Result<U256> {
    if x < one() || x >= two() {
        return Err(AmmError::InvalidDomain {
            function: "optimal_log",
            argument: x,
        });
    }
    let z = ((x - one()) << PRECISION) / (x + one());
    let z_squared = (z * z) >> PRECISION;

    let mut term = z;
    let mut sum = U256::zero();
    let mut denominator = U256::one();
    while !term.is_zero() {
        sum += term / denominator;
        term = (term * z_squared) >> PRECISION;
        denominator += U256::from(2u8);
    }
    Ok(sum << 1)
}

/// Natural logarithm for any `x >= 1.0`.
///
/// The integer part of `log2(x)` is taken from the most significant bit and
/// the residual in `[1, 2)` goes through [`optimal_log`].
///
/// # Errors
///
/// Returns [`AmmError::InvalidDomain`] if `x < 1.0`.
pub fn ln(x: U256) -> Result<U256> {
    ensure_log_domain("ln", x)?;
    let mut x = x;
    let mut result = U256::zero();
    if x >= two() {
        let count = floor_log2(x / one());
        x = x >> count;
        result = U256::from(count) * U256::from(LN2);
    }
    Ok(result + optimal_log(x)?)
}

/// Natural exponential `e^x`.
///
/// Domain: `0 <= x <= 88.0`, which keeps the result below `2^255`.
///
/// # Errors
///
/// Returns [`AmmError::InvalidDomain`] if `x` exceeds the domain.
pub fn optimal_exp(x: U256) -> Result<U256> {
    if x > U256::from(MAX_EXP_ARGUMENT) << PRECISION {
        return Err(AmmError::InvalidDomain {
            function: "optimal_exp",
            argument: x,
        });
    }
    let ln2 = U256::from(LN2);
    let halvings = x / ln2;
    let residual = x - halvings * ln2;

    let mut term = one();
    let mut sum = one();
    let mut n = U256::one();
    loop {
        term = ((term * residual) >> PRECISION) / n;
        if term.is_zero() {
            break;
        }
        sum += term;
        n += U256::one();
    }
    Ok(sum << halvings.low_u32())
}

/// Fractional power `(base_n / base_d) ^ (exp_n / exp_d)` in Q1.127,
/// evaluated as `optimal_exp(general_log(base) * exp_n / exp_d)`.
///
/// Requires `base_n >= base_d > 0` so that the logarithm is non-negative.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `base_d` or `exp_d` is zero.
/// - [`AmmError::InvalidDomain`] if `base_n < base_d` or the exponent
///   leaves the domain of [`optimal_exp`].
/// - [`AmmError::Overflow`] if the base ratio does not fit.
pub fn power(base_n: U256, base_d: U256, exp_n: U256, exp_d: U256) -> Result<U256> {
    if exp_d.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let base = mul_div(base_n, one(), base_d)?;
    let log = general_log(base).map_err(|_| AmmError::InvalidDomain {
        function: "power",
        argument: base,
    })?;
    let exponent = mul_div(log, exp_n, exp_d)?;
    optimal_exp(exponent)
}
