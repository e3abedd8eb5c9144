//! Property-based checks for the reserve curves.
//!
//! 1. **Monotonic output**: constant-product output grows with input and
//!    stays below the output reserve.
//! 2. **Peg accuracy**: a balanced, fee-free stable pool swaps at par
//!    within `1e-6` relative error.
//! 3. **Exact-out coverage**: the quoted input for an output buys at least
//!    that output, on every curve.
//! 4. **Burn never over-pays**: minting then burning returns no more than
//!    was deposited.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::{proportional_withdrawal, ConstantProduct, Invariant, StableSwap, Weighted};
use crate::config::EngineConfig;
use crate::domain::{
    Address, Amount, BasisPoints, Decimals, Liquidity, Reserves, SwapDirection, Token, TokenPair,
};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn pair() -> TokenPair {
    let Ok(d) = Decimals::new(18) else {
        panic!("valid decimals");
    };
    let Ok(pair) = TokenPair::new(
        Token::new(Address::from_bytes([1u8; 32]), d),
        Token::new(Address::from_bytes([2u8; 32]), d),
    ) else {
        panic!("valid pair");
    };
    pair
}

fn stable(amplification: u32, fee: u32) -> StableSwap {
    let Ok(curve) = StableSwap::new(
        amplification,
        BasisPoints::new(fee),
        &pair(),
        &EngineConfig::default(),
    ) else {
        panic!("valid stable curve");
    };
    curve
}

fn reserves(r0: u128, r1: u128) -> Reserves {
    Reserves::new(Amount::new(r0), Amount::new(r1))
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000u128..=1_000_000_000_000_000_000u128
}

fn fee_strategy() -> impl Strategy<Value = u32> {
    0u32..=1_000u32
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![Just(SwapDirection::ZeroForOne), Just(SwapDirection::OneForZero)]
}

// ---------------------------------------------------------------------------
// Property 1: constant-product monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_constant_product_output_monotonic(
        reserve_in in reserve_strategy(),
        reserve_out in reserve_strategy(),
        fee in fee_strategy(),
        amount in 1u128..=1_000_000_000_000u128,
        extra in 1u128..=1_000_000u128,
    ) {
        let curve = ConstantProduct::new(BasisPoints::new(fee));
        let (r_in, r_out) = (Amount::new(reserve_in), Amount::new(reserve_out));
        let small = curve.quote_out(Amount::new(amount), r_in, r_out).unwrap_or_default();
        let Ok(large) = curve.quote_out(Amount::new(amount + extra), r_in, r_out) else {
            // both too small to produce output
            prop_assert!(small.is_zero());
            return Ok(());
        };
        prop_assert!(large >= small);
        prop_assert!(large < r_out);
    }
}

// ---------------------------------------------------------------------------
// Property 2: stable peg accuracy
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_stable_balanced_swap_at_par(
        reserve in 1_000_000_000_000u128..=1_000_000_000_000_000_000u128,
        amplification in 100u32..=5_000u32,
        fraction in 1u128..=100_000u128,
        direction in direction_strategy(),
    ) {
        // amount in [1e6, reserve / 1e5]
        let amount = (reserve / 100_000 * fraction / 100_000).max(1_000_000);
        let Ok(quote) = stable(amplification, 0).amount_out(
            &reserves(reserve, reserve),
            direction,
            Amount::new(amount),
        ) else {
            panic!("balanced stable swap should succeed");
        };
        let error = amount.abs_diff(quote.amount_out.get()) as f64 / amount as f64;
        prop_assert!(error <= 1e-6, "relative error {error} for {amount}");
        prop_assert!(quote.amount_out.get() <= amount);
    }
}

// ---------------------------------------------------------------------------
// Property 3: exact-out coverage
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_exact_out_buys_requested_output(
        reserve0 in 1_000_000_000u128..=1_000_000_000_000_000u128,
        ratio in 1u128..=4u128,
        fee in fee_strategy(),
        divisor in 100u128..=10_000u128,
        direction in direction_strategy(),
    ) {
        let pool = reserves(reserve0, reserve0 * ratio);
        let (_, reserve_out) = pool.oriented(direction);
        let wanted = Amount::new((reserve_out.get() / divisor).max(1));
        let fee = BasisPoints::new(fee);

        let constant_product = ConstantProduct::new(fee);
        let weighted = Weighted::new(60, 40, fee);
        let stable = stable(200, fee.get());
        let curves: [&dyn Invariant; 3] = [&constant_product, &weighted, &stable];
        for curve in curves {
            let Ok(needed) = curve.amount_in(&pool, direction, wanted) else {
                continue;
            };
            let Ok(bought) = curve.amount_out(&pool, direction, needed.amount_in) else {
                panic!("quoted input should be swappable");
            };
            prop_assert!(bought.amount_out >= wanted);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: mint then burn never over-pays
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_mint_burn_conserves_value(
        reserve0 in reserve_strategy(),
        reserve1 in reserve_strategy(),
        deposit0 in 1u128..=1_000_000_000_000u128,
        deposit1 in 1u128..=1_000_000_000_000u128,
    ) {
        let curve = ConstantProduct::new(BasisPoints::new(30));
        let Ok(seed) = curve.mint_shares(
            &Reserves::default(),
            Liquidity::ZERO,
            Amount::new(reserve0),
            Amount::new(reserve1),
        ) else {
            return Ok(());
        };
        let mut pool = reserves(reserve0, reserve1);
        let Some(total) = seed.minted.checked_add(seed.locked) else {
            panic!("share total fits");
        };
        let Ok(mint) = curve.mint_shares(&pool, total, Amount::new(deposit0), Amount::new(deposit1))
        else {
            return Ok(());
        };
        prop_assert!(pool.deposit(Amount::new(deposit0), Amount::new(deposit1)).is_ok());
        let Some(total) = total.checked_add(mint.minted) else {
            panic!("share total fits");
        };
        let Ok((out0, out1)) = proportional_withdrawal(&pool, total, mint.minted) else {
            panic!("burning minted shares succeeds");
        };
        prop_assert!(out0.get() <= deposit0);
        prop_assert!(out1.get() <= deposit1);
    }
}
