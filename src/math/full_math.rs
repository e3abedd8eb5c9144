//! Overflow-exact multiply-divide over 256-bit operands.
//!
//! The product `a * b` is formed at 512-bit width and split into high and
//! low 256-bit limbs. When the high limb is zero the division runs at native
//! width; otherwise the quotient is known to fit exactly when
//! `high < denominator`, and the wide division is narrowed back.

use primitive_types::{U256, U512};

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

#[inline]
fn split(wide: U512) -> (U256, U256) {
    let U512(limbs) = wide;
    (
        U256([limbs[4], limbs[5], limbs[6], limbs[7]]),
        U256([limbs[0], limbs[1], limbs[2], limbs[3]]),
    )
}

#[inline]
fn widen(value: U256) -> U512 {
    let U256(limbs) = value;
    U512([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

/// Computes `floor(a * b / denominator)` without intermediate overflow.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the true quotient does not fit in 256 bits.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let product = a.full_mul(b);
    let (high, low) = split(product);
    if high.is_zero() {
        return Ok(low / denominator);
    }
    if high >= denominator {
        return Err(AmmError::Overflow("mul_div quotient exceeds 256 bits"));
    }
    let (_, quotient) = split(product / widen(denominator));
    Ok(quotient)
}

/// Computes `ceil(a * b / denominator)` without intermediate overflow.
///
/// # Errors
///
/// Same as [`mul_div`], plus [`AmmError::Overflow`] when rounding up
/// carries past 256 bits.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256> {
    let quotient = mul_div(a, b, denominator)?;
    let remainder = a.full_mul(b) % widen(denominator);
    if remainder.is_zero() {
        return Ok(quotient);
    }
    quotient
        .checked_add(U256::one())
        .ok_or(AmmError::Overflow("mul_div rounding up exceeds 256 bits"))
}

/// Computes `floor((a * b + addend) / denominator)` at 512-bit width.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::Overflow`] if the quotient does not fit in 256 bits.
pub fn mul_add_div(a: U256, b: U256, addend: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let numerator = a
        .full_mul(b)
        .checked_add(widen(addend))
        .ok_or(AmmError::Overflow("mul_add_div numerator exceeds 512 bits"))?;
    let (high, quotient) = split(numerator / widen(denominator));
    if !high.is_zero() {
        return Err(AmmError::Overflow("mul_add_div quotient exceeds 256 bits"));
    }
    Ok(quotient)
}

/// Computes `ceil(numerator / denominator)`.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `denominator` is zero.
pub fn div_rounding_up(numerator: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let quotient = numerator / denominator;
    if (numerator % denominator).is_zero() {
        Ok(quotient)
    } else {
        // quotient < numerator whenever a remainder exists, so no carry
        Ok(quotient + U256::one())
    }
}

/// Multiply-divide with an explicit rounding direction.
///
/// # Errors
///
/// See [`mul_div`] and [`mul_div_rounding_up`].
pub fn mul_div_rounded(a: U256, b: U256, denominator: U256, rounding: Rounding) -> Result<U256> {
    match rounding {
        Rounding::Down => mul_div(a, b, denominator),
        Rounding::Up => mul_div_rounding_up(a, b, denominator),
    }
}

/// `u128` convenience wrapper around [`mul_div_rounded`].
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `denominator` is zero.
/// - [`AmmError::CastOverflow`] if the quotient does not fit in `u128`.
pub fn mul_div_u128(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    use super::SafeCast;

    mul_div_rounded(
        U256::from(a),
        U256::from(b),
        U256::from(denominator),
        rounding,
    )?
    .safe_cast()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn u(v: u128) -> U256 {
        U256::from(v)
    }

    // -- mul_div ------------------------------------------------------------

    #[test]
    fn mul_add_div_keeps_wide_numerator() {
        // (2^257 + 4) / 8 floors to 2^254
        let Ok(q) = mul_add_div(U256::one() << 255, u(4), u(4), u(8)) else {
            panic!("expected Ok");
        };
        assert_eq!(q, U256::one() << 254);
        assert!(matches!(
            mul_add_div(U256::MAX, U256::MAX, U256::zero(), u(1)),
            Err(AmmError::Overflow(_))
        ));
    }

    #[test]
    fn small_operands_floor() {
        let Ok(q) = mul_div(u(7), u(3), u(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(q, u(10));
    }

    #[test]
    fn full_width_product_divides_back() {
        let Ok(q) = mul_div(U256::MAX, U256::MAX, U256::MAX) else {
            panic!("expected Ok");
        };
        assert_eq!(q, U256::MAX);
    }

    #[test]
    fn wide_product_with_narrow_quotient() {
        // (2^255 * 6) / 4 = 3 * 2^254
        let half = U256::one() << 255;
        let Ok(q) = mul_div(half, u(6), u(4)) else {
            panic!("expected Ok");
        };
        assert_eq!(q, u(3) << 254);
    }

    #[test]
    fn quotient_overflow_is_reported() {
        let result = mul_div(U256::MAX, u(2), u(1));
        assert!(matches!(result, Err(AmmError::Overflow(_))));
    }

    #[test]
    fn zero_denominator_is_reported() {
        assert_eq!(mul_div(u(1), u(1), U256::zero()), Err(AmmError::DivisionByZero));
    }

    // -- rounding up --------------------------------------------------------

    #[test]
    fn rounding_up_only_when_remainder() {
        assert_eq!(mul_div_rounding_up(u(7), u(3), u(2)), Ok(u(11)));
        assert_eq!(mul_div_rounding_up(u(8), u(3), u(2)), Ok(u(12)));
    }

    #[test]
    fn rounding_up_carry_overflows() {
        // true quotient sits just above 2^256 - 1
        let result = mul_div_rounding_up(U256::MAX, U256::MAX - 1, U256::MAX - 2);
        assert!(matches!(result, Err(AmmError::Overflow(_))));
    }

    #[test]
    fn div_rounding_up_basic() {
        assert_eq!(div_rounding_up(u(10), u(3)), Ok(u(4)));
        assert_eq!(div_rounding_up(u(9), u(3)), Ok(u(3)));
        assert_eq!(div_rounding_up(u(9), U256::zero()), Err(AmmError::DivisionByZero));
    }

    #[test]
    fn u128_wrapper_narrows() {
        assert_eq!(mul_div_u128(1_000, 997, 1_000, Rounding::Down), Ok(997));
        let result = mul_div_u128(u128::MAX, 2, 1, Rounding::Down);
        assert!(matches!(result, Err(AmmError::CastOverflow { .. })));
    }

    // -- properties ---------------------------------------------------------

    fn any_u256() -> impl Strategy<Value = U256> {
        any::<[u64; 4]>().prop_map(U256)
    }

    proptest! {
        #[test]
        fn quotient_reconstructs_product(a in any_u256(), b in any_u256(), d in any_u256()) {
            prop_assume!(!d.is_zero());
            let product = a.full_mul(b);
            match mul_div(a, b, d) {
                Ok(q) => {
                    let remainder = product % widen(d);
                    prop_assert_eq!(q.full_mul(d) + remainder, product);
                    prop_assert!(remainder < widen(d));
                }
                Err(err) => {
                    prop_assert!(matches!(err, AmmError::Overflow(_)));
                    // quotient really does exceed 256 bits
                    let (high, _) = split(product / widen(d));
                    prop_assert!(!high.is_zero());
                }
            }
        }

        #[test]
        fn matches_native_floor_for_u128(a in any::<u128>(), b in any::<u128>(), d in 1u128..) {
            let expected = (u(a) * u(b)) / u(d);
            prop_assert_eq!(mul_div(u(a), u(b), u(d)), Ok(expected));
        }
    }
}
