//! Integer square roots.
//!
//! Newton's method seeded with `2^ceil(bits/2)`, which is never below the
//! true root. From above, the iteration decreases monotonically and stops
//! at `floor(sqrt(x))` the first time the next estimate fails to shrink.

use primitive_types::U256;

/// `floor(sqrt(x))` for a 256-bit operand.
#[must_use]
pub fn sqrt(x: U256) -> U256 {
    if x.is_zero() {
        return U256::zero();
    }
    let mut estimate = U256::one() << x.bits().div_ceil(2);
    loop {
        let next = (estimate + x / estimate) >> 1;
        if next >= estimate {
            return estimate;
        }
        estimate = next;
    }
}

/// `floor(sqrt(x))` for a 128-bit operand.
#[must_use]
pub fn sqrt_u128(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }
    let bits = u128::BITS - x.leading_zeros();
    let mut estimate = 1u128 << bits.div_ceil(2);
    loop {
        let next = (estimate + x / estimate) >> 1;
        if next >= estimate {
            return estimate;
        }
        estimate = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn small_values() {
        let expected = [0u128, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3];
        for (x, root) in expected.iter().enumerate() {
            assert_eq!(sqrt_u128(x as u128), *root, "sqrt({x})");
            assert_eq!(sqrt(U256::from(x as u128)), U256::from(*root));
        }
    }

    #[test]
    fn perfect_squares() {
        assert_eq!(sqrt_u128(1_000_000_000_000), 1_000_000);
        assert_eq!(sqrt(U256::from(1u128 << 100)), U256::from(1u128 << 50));
    }

    #[test]
    fn extremes() {
        assert_eq!(sqrt_u128(u128::MAX), u64::MAX as u128);
        assert_eq!(sqrt(U256::MAX), U256::from(u128::MAX));
    }

    proptest! {
        #[test]
        fn u128_root_brackets_input(x in any::<u128>()) {
            let r = U256::from(sqrt_u128(x));
            let x = U256::from(x);
            prop_assert!(r * r <= x);
            prop_assert!((r + U256::one()) * (r + U256::one()) > x);
        }

        #[test]
        fn u256_root_brackets_input(limbs in any::<[u64; 4]>()) {
            let x = U256(limbs);
            let r = sqrt(x);
            prop_assert!(r.full_mul(r) <= x.full_mul(U256::one()));
            let next = r + U256::one();
            prop_assert!(next.full_mul(next) > x.full_mul(U256::one()));
        }
    }
}
