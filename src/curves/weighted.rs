//! Weighted geometric-mean curve (Balancer style, two tokens).
//!
//! Holding `x^w_in * y^w_out` constant, an input `dx` (after fee) yields
//!
//! ```text
//! p  = ((x + dx) / x) ^ (w_in / w_out)
//! dy = y * (p - 1) / p
//! ```
//!
//! where `p` is evaluated in Q1.127 with [`power`], that is `general_log`
//! followed by `optimal_exp`. The exponent must stay
//! within the domain of `optimal_exp`, which bounds how far a single swap
//! can move a heavily skewed pool.

use primitive_types::U256;

use super::{
    ensure_swappable, geometric_first_mint, gross_up, proportional_mint, take_fee, Invariant,
    ShareMint, SwapQuote,
};
use crate::domain::{Amount, BasisPoints, Liquidity, Reserves, SwapDirection};
use crate::error::{AmmError, Result};
use crate::math::{mul_div, mul_div_rounding_up, power, FIXED_ONE};

/// Weighted pricing with a fixed weight per token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weighted {
    weight0: u32,
    weight1: u32,
    fee: BasisPoints,
}

impl Weighted {
    /// Creates the curve. Weights are validated by
    /// [`CurveParameters`](crate::config::CurveParameters).
    #[must_use]
    pub const fn new(weight0: u32, weight1: u32, fee: BasisPoints) -> Self {
        Self {
            weight0,
            weight1,
            fee,
        }
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }

    /// `(weight0, weight1)`.
    #[must_use]
    pub const fn weights(&self) -> (u32, u32) {
        (self.weight0, self.weight1)
    }

    const fn oriented_weights(&self, direction: SwapDirection) -> (u32, u32) {
        match direction {
            SwapDirection::ZeroForOne => (self.weight0, self.weight1),
            SwapDirection::OneForZero => (self.weight1, self.weight0),
        }
    }

    /// Output for a net (post-fee) input.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidDomain`] if the implied power leaves the
    ///   exponential's domain.
    /// - Numeric kernel failures.
    pub fn net_out(
        &self,
        net_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
        direction: SwapDirection,
    ) -> Result<Amount> {
        let (weight_in, weight_out) = self.oriented_weights(direction);
        let grown = reserve_in
            .checked_add(net_in, "weighted input balance")?
            .as_u256();
        let p = power(
            grown,
            reserve_in.as_u256(),
            U256::from(weight_in),
            U256::from(weight_out),
        )?;
        let one = U256::from(FIXED_ONE);
        let out = mul_div(reserve_out.as_u256(), p.saturating_sub(one), p)?;
        Amount::from_u256(out)
    }
}

impl Invariant for Weighted {
    fn amount_out(
        &self,
        reserves: &Reserves,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<SwapQuote> {
        let (reserve_in, reserve_out) = reserves.oriented(direction);
        ensure_swappable(reserve_in, reserve_out, amount_in)?;
        let (net, fee) = take_fee(amount_in, self.fee)?;
        let amount_out = self.net_out(net, reserve_in, reserve_out, direction)?;
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity {
                reason: "swap produces no output",
                available: reserve_out.as_u256(),
            });
        }
        Ok(SwapQuote {
            amount_in,
            amount_out,
            fee,
        })
    }

    fn amount_in(
        &self,
        reserves: &Reserves,
        direction: SwapDirection,
        amount_out: Amount,
    ) -> Result<SwapQuote> {
        let (reserve_in, reserve_out) = reserves.oriented(direction);
        ensure_swappable(reserve_in, reserve_out, amount_out)?;
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity {
                reason: "output meets or exceeds reserve",
                available: reserve_out.as_u256(),
            });
        }
        let (weight_in, weight_out) = self.oriented_weights(direction);
        let remaining = reserve_out.checked_sub(amount_out, "weighted output balance")?;
        let p = power(
            reserve_out.as_u256(),
            remaining.as_u256(),
            U256::from(weight_out),
            U256::from(weight_in),
        )?;
        let one = U256::from(FIXED_ONE);
        let net = Amount::from_u256(mul_div_rounding_up(
            reserve_in.as_u256(),
            p.saturating_sub(one),
            one,
        )?)?;
        let amount_in = gross_up(net, self.fee)?;
        let fee = amount_in.checked_sub(net, "weighted fee")?;
        Ok(SwapQuote {
            amount_in,
            amount_out,
            fee,
        })
    }

    fn mint_shares(
        &self,
        reserves: &Reserves,
        total_shares: Liquidity,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<ShareMint> {
        if total_shares.is_zero() {
            geometric_first_mint(amount0, amount1)
        } else {
            proportional_mint(reserves, total_shares, amount0, amount1)
        }
    }
}
