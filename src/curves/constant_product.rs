//! Constant-product curve (`x * y = k`).
//!
//! For an input `dx` with fee rate `f` (basis points):
//!
//! ```text
//! dy = reserve_out * dx * (10000 - f) / (reserve_in * 10000 + dx * (10000 - f))
//! ```
//!
//! evaluated in one `mul_div` so no precision is lost to an intermediate
//! fee rounding.

use super::{
    ensure_swappable, geometric_first_mint, gross_up, proportional_mint, wide, Invariant, ShareMint,
    SwapQuote,
};
use crate::domain::{Amount, BasisPoints, Liquidity, Reserves, Rounding, SwapDirection};
use crate::error::{AmmError, Result};
use crate::math::{mul_div, mul_div_u128};

/// Uniswap-v2 style pricing.
///
/// # Examples
///
/// ```
/// use tick_amm::curves::ConstantProduct;
/// use tick_amm::domain::{Amount, BasisPoints};
///
/// let curve = ConstantProduct::new(BasisPoints::new(30));
/// let out = curve.quote_out(Amount::new(1_000), Amount::new(1_000_000), Amount::new(1_000_000));
/// assert_eq!(out, Ok(Amount::new(996)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantProduct {
    fee: BasisPoints,
}

impl ConstantProduct {
    /// Creates the curve with a swap fee.
    #[must_use]
    pub const fn new(fee: BasisPoints) -> Self {
        Self { fee }
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }

    /// Output for `amount_in` against oriented reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInput`] for a zero input.
    /// - [`AmmError::InsufficientLiquidity`] if a reserve is empty or the
    ///   output rounds to zero.
    pub fn quote_out(&self, amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
        ensure_swappable(reserve_in, reserve_out, amount_in)?;
        let complement = self.complement()?;
        let weighted_in = amount_in.as_u256() * wide(complement);
        let denominator = reserve_in
            .as_u256()
            .checked_mul(wide(u128::from(BasisPoints::DENOMINATOR)))
            .and_then(|scaled| scaled.checked_add(weighted_in))
            .ok_or(AmmError::Overflow("constant product denominator"))?;
        let out = Amount::from_u256(mul_div(reserve_out.as_u256(), weighted_in, denominator)?)?;
        if out.is_zero() {
            return Err(AmmError::InsufficientLiquidity {
                reason: "swap produces no output",
                available: reserve_out.as_u256(),
            });
        }
        Ok(out)
    }

    /// Input, fee included, needed for `amount_out` against oriented
    /// reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInput`] for a zero output.
    /// - [`AmmError::InsufficientLiquidity`] if the output would drain the
    ///   reserve.
    pub fn quote_in(&self, amount_out: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
        ensure_swappable(reserve_in, reserve_out, amount_out)?;
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity {
                reason: "output meets or exceeds reserve",
                available: reserve_out.as_u256(),
            });
        }
        let remaining = reserve_out.checked_sub(amount_out, "constant product remaining")?;
        let net = mul_div_u128(reserve_in.get(), amount_out.get(), remaining.get(), Rounding::Up)?;
        gross_up(Amount::new(net), self.fee)
    }

    fn complement(&self) -> Result<u128> {
        self.fee
            .complement()
            .map(|c| u128::from(c.get()))
            .ok_or(AmmError::InvalidSwapFee {
                fee: self.fee.get(),
                max: BasisPoints::DENOMINATOR,
            })
    }
}

impl Invariant for ConstantProduct {
    fn amount_out(
        &self,
        reserves: &Reserves,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<SwapQuote> {
        let (reserve_in, reserve_out) = reserves.oriented(direction);
        let amount_out = self.quote_out(amount_in, reserve_in, reserve_out)?;
        let fee = self.fee.apply(amount_in, Rounding::Up)?;
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
        let amount_in = self.quote_in(amount_out, reserve_in, reserve_out)?;
        let fee = self.fee.apply(amount_in, Rounding::Up)?;
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

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn curve() -> ConstantProduct {
        ConstantProduct::new(BasisPoints::new(30))
    }

    fn a(v: u128) -> Amount {
        Amount::new(v)
    }

    // -- exact in -----------------------------------------------------------

    #[test]
    fn reference_swap() {
        // floor(1_000_000 * 997 * 1000 / (1_000_000 * 1000 + 997 * 1000))
        let expected = 1_000_000u128 * 997 * 1_000 / (1_000_000 * 1_000 + 997 * 1_000);
        assert_eq!(expected, 996);
        assert_eq!(curve().quote_out(a(1_000), a(1_000_000), a(1_000_000)), Ok(a(expected)));
    }

    #[test]
    fn empty_reserve_and_zero_input() {
        assert!(matches!(
            curve().quote_out(a(1_000), a(0), a(1_000_000)),
            Err(AmmError::InsufficientLiquidity { .. })
        ));
        assert!(matches!(
            curve().quote_out(a(0), a(1_000_000), a(1_000_000)),
            Err(AmmError::InsufficientInput { .. })
        ));
    }

    #[test]
    fn dust_input_yields_nothing() {
        assert!(matches!(
            curve().quote_out(a(1), a(1_000_000), a(1_000)),
            Err(AmmError::InsufficientLiquidity { .. })
        ));
    }

    #[test]
    fn full_width_reserves_do_not_overflow() {
        let Ok(out) = curve().quote_out(a(u128::MAX / 2), a(u128::MAX / 2), a(u128::MAX)) else {
            panic!("expected Ok");
        };
        assert!(out < a(u128::MAX));
    }

    // -- exact out ----------------------------------------------------------

    #[test]
    fn quote_in_covers_quote_out() {
        let Ok(needed) = curve().quote_in(a(996), a(1_000_000), a(1_000_000)) else {
            panic!("expected Ok");
        };
        assert!(needed <= a(1_000));
        let Ok(out) = curve().quote_out(needed, a(1_000_000), a(1_000_000)) else {
            panic!("expected Ok");
        };
        assert!(out >= a(996));
    }

    #[test]
    fn draining_output_rejected() {
        assert!(matches!(
            curve().quote_in(a(1_000_000), a(1_000_000), a(1_000_000)),
            Err(AmmError::InsufficientLiquidity { .. })
        ));
    }

    // -- trait surface ------------------------------------------------------

    #[test]
    fn direction_orients_reserves() {
        let reserves = Reserves::new(a(2_000_000), a(1_000_000));
        let (Ok(zero_for_one), Ok(one_for_zero)) = (
            curve().amount_out(&reserves, SwapDirection::ZeroForOne, a(10_000)),
            curve().amount_out(&reserves, SwapDirection::OneForZero, a(10_000)),
        ) else {
            panic!("expected Ok");
        };
        assert!(zero_for_one.amount_out < one_for_zero.amount_out);
        assert_eq!(zero_for_one.fee, a(30));
    }
}
