//! Property-based checks for the pools.
//!
//! 1. **Cursor consistency**: after any swap over layered ranges, active
//!    liquidity equals the summed net liquidity of every tick at or below
//!    both the cursor and the current tick, and the price sits between the
//!    cursor and its successor.
//! 2. **Mint/burn round trip**: burning a fresh concentrated position
//!    returns no more than was deposited and restores the tick chain.
//! 3. **Swap reversibility**: swapping out and straight back through a
//!    reserve pool never returns more than the original input.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::{ConcentratedPool, CurvePool, RangeDeposit, RangeWithdrawal, ShareDeposit};
use crate::config::{ConcentratedConfig, CurveKind, CurveParameters, CurvePoolConfig, EngineConfig};
use crate::domain::{
    Address, Amount, BasisPoints, Decimals, FeeTier, Liquidity, SqrtPrice, SwapDirection,
    SwapRequest, TickRange, Token, TokenPair,
};
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn pair() -> TokenPair {
    let Ok(pair) = TokenPair::new(
        Token::new(Address::from_bytes([1u8; 32]), Decimals::MAX),
        Token::new(Address::from_bytes([2u8; 32]), Decimals::MAX),
    ) else {
        panic!("valid pair");
    };
    pair
}

fn owner() -> Address {
    Address::from_bytes([5u8; 32])
}

fn concentrated() -> ConcentratedPool {
    let engine = EngineConfig::default();
    let Ok(config) = ConcentratedConfig::new(pair(), FeeTier::MEDIUM, SqrtPrice::unit(), &engine)
    else {
        panic!("valid config");
    };
    let Ok(pool) = ConcentratedPool::from_config(&config, &engine) else {
        panic!("pool builds");
    };
    pool
}

fn constant_product(reserve0: u128, reserve1: u128) -> CurvePool {
    let engine = EngineConfig::default();
    let Ok(params) = CurveParameters::new(CurveKind::ConstantProduct, BasisPoints::new(30), &engine)
    else {
        panic!("valid parameters");
    };
    let Ok(config) = CurvePoolConfig::new(pair(), params, &engine) else {
        panic!("valid config");
    };
    let Ok(mut pool) = CurvePool::from_config(&config, &engine) else {
        panic!("pool builds");
    };
    let deposit = ShareDeposit::new(Amount::new(reserve0), Amount::new(reserve1));
    let Ok(_) = pool.mint(&deposit, Liquidity::ZERO, owner()) else {
        panic!("seed mint");
    };
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// A spacing-aligned range near the starting price.
fn range_strategy() -> impl Strategy<Value = TickRange> {
    (-20i32..=20, 1i32..=10).prop_map(|(lower, width)| {
        let Ok(range) = TickRange::from_indices(lower * 60, (lower + width) * 60) else {
            panic!("aligned range");
        };
        range
    })
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![Just(SwapDirection::ZeroForOne), Just(SwapDirection::OneForZero)]
}

// ---------------------------------------------------------------------------
// Property 1: cursor consistency
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_active_liquidity_tracks_cursor(
        ranges in proptest::collection::vec(
            (range_strategy(), 1_000_000u128..=10_000_000_000u128),
            0..=4,
        ),
        direction in direction_strategy(),
        amount in 1_000u128..=10_000_000_000u128,
    ) {
        let mut pool = concentrated();
        let full = RangeDeposit::liquidity(TickRange::full(), Liquidity::new(1_000_000_000_000));
        let Ok(_) = pool.mint(&full, Liquidity::ZERO, owner()) else {
            panic!("full-range mint");
        };
        for (range, liquidity) in &ranges {
            let deposit = RangeDeposit::liquidity(*range, Liquidity::new(*liquidity));
            let Ok(_) = pool.mint(&deposit, Liquidity::ZERO, owner()) else {
                panic!("mint over {range:?}");
            };
        }

        let Ok(receipt) = pool.swap(&SwapRequest::new(Amount::new(amount), direction, owner())) else {
            panic!("swap against deep liquidity");
        };
        prop_assert!(receipt.is_filled());

        let nearest = pool.accounting().nearest_tick();
        let summed: i128 = pool
            .ticks()
            .take_while(|(tick, _)| *tick <= nearest)
            .map(|(_, record)| record.liquidity_net)
            .sum();
        prop_assert_eq!(Ok(pool.active_liquidity().get()), u128::try_from(summed));
        let below_current: i128 = pool
            .ticks()
            .take_while(|(tick, _)| *tick <= pool.current_tick())
            .map(|(_, record)| record.liquidity_net)
            .sum();
        prop_assert_eq!(summed, below_current);

        let Ok(next) = pool.accounting().ledger().next(nearest) else {
            panic!("cursor is initialized");
        };
        let (Ok(floor), Ok(ceiling)) = (SqrtPrice::from_tick(nearest), SqrtPrice::from_tick(next)) else {
            panic!("tick prices");
        };
        prop_assert!(floor <= pool.sqrt_price());
        prop_assert!(pool.sqrt_price() <= ceiling);
        prop_assert_eq!(pool.sqrt_price().tick(), Ok(pool.current_tick()));
    }
}

// ---------------------------------------------------------------------------
// Property 2: mint/burn round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_burn_never_overpays(
        range in range_strategy(),
        liquidity in 1_000u128..=1_000_000_000_000_000u128,
    ) {
        let mut pool = concentrated();
        let deposit = RangeDeposit::liquidity(range, Liquidity::new(liquidity));
        let Ok(minted) = pool.mint(&deposit, Liquidity::ZERO, owner()) else {
            panic!("mint over {range:?}");
        };
        let withdrawal = RangeWithdrawal {
            owner: owner(),
            range,
            liquidity: Liquidity::new(liquidity),
        };
        let Ok(burned) = pool.burn(&withdrawal, owner()) else {
            panic!("burn over {range:?}");
        };

        prop_assert!(burned.amount0 <= minted.amount0);
        prop_assert!(burned.amount1 <= minted.amount1);
        prop_assert!(minted.amount0.get() - burned.amount0.get() <= 1);
        prop_assert!(minted.amount1.get() - burned.amount1.get() <= 1);
        prop_assert_eq!(pool.ticks().count(), 2);
        prop_assert!(pool.position(&owner(), range).is_none());
        prop_assert_eq!(pool.active_liquidity(), Liquidity::ZERO);
    }
}

// ---------------------------------------------------------------------------
// Property 3: swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_round_trip_swap_loses_value(
        reserve in 1_000_000_000u128..=1_000_000_000_000_000u128,
        skew in 1u128..=4u128,
        amount in 1_000_000u128..=100_000_000u128,
    ) {
        let mut pool = constant_product(reserve, reserve * skew);
        let Ok(out) = pool.swap(&SwapRequest::new(Amount::new(amount), SwapDirection::ZeroForOne, owner())) else {
            panic!("outbound swap");
        };
        let Ok(back) = pool.swap(&SwapRequest::new(out.amount_out, SwapDirection::OneForZero, owner())) else {
            panic!("return swap");
        };
        prop_assert!(back.amount_out.get() <= amount);
    }
}
