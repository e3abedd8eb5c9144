//! Reserve-curve pricing: how much comes out for an input, how much must go
//! in for an output, and how many pool shares a deposit is worth.
//!
//! Three invariants implement [`Invariant`]:
//!
//! | Curve | Invariant | Solver |
//! |-------|-----------|--------|
//! | [`ConstantProduct`] | `x * y = k` | closed form via `mul_div` |
//! | [`StableSwap`] | amplified sum `D` | Newton-Raphson, capped |
//! | [`Weighted`] | `x^wx * y^wy = k` | Q1.127 `power` |
//!
//! The fee is always taken from the input before the invariant is
//! evaluated, and stays in the pool.
//!
//! [`CurveStrategy`] is the tagged union a pool stores; it is chosen once
//! from [`CurveParameters`] and never changes.

mod constant_product;
mod stable;
mod weighted;

#[cfg(test)]
mod proptest_properties;

pub use constant_product::ConstantProduct;
pub use stable::StableSwap;
pub use weighted::Weighted;

use primitive_types::U256;

use crate::config::{CurveKind, CurveParameters, EngineConfig};
use crate::domain::{Amount, BasisPoints, Liquidity, Reserves, Rounding, SwapDirection, TokenPair};
use crate::error::{AmmError, Result};
use crate::math::{mul_div_u128, sqrt};

/// Shares permanently locked by the first deposit.
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// Priced swap before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    /// Input the caller pays, fee included.
    pub amount_in: Amount,
    /// Output the caller receives.
    pub amount_out: Amount,
    /// Part of `amount_in` kept as fee.
    pub fee: Amount,
}

/// Shares created by a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareMint {
    /// Credited to the depositor.
    pub minted: Liquidity,
    /// Locked forever; non-zero only on the first deposit.
    pub locked: Liquidity,
}

/// Pricing rules of one reserve curve.
pub trait Invariant {
    /// Output for an exact input.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInput`] for a zero input.
    /// - [`AmmError::InsufficientLiquidity`] for an empty reserve or a
    ///   swap that yields nothing.
    /// - Numeric kernel failures.
    fn amount_out(
        &self,
        reserves: &Reserves,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<SwapQuote>;

    /// Input needed for an exact output.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInput`] for a zero output.
    /// - [`AmmError::InsufficientLiquidity`] if the output meets or exceeds
    ///   the reserve.
    /// - Numeric kernel failures.
    fn amount_in(
        &self,
        reserves: &Reserves,
        direction: SwapDirection,
        amount_out: Amount,
    ) -> Result<SwapQuote>;

    /// Shares for depositing `amount0` and `amount1` into `reserves`
    /// backed by `total_shares`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInput`] if the deposit is worth no shares
    ///   or the first deposit does not clear [`MINIMUM_LIQUIDITY`].
    /// - Numeric kernel failures.
    fn mint_shares(
        &self,
        reserves: &Reserves,
        total_shares: Liquidity,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<ShareMint>;
}

/// The curve a reserve pool was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveStrategy {
    /// `x * y = k`.
    ConstantProduct(ConstantProduct),
    /// Amplified-sum invariant.
    Stable(StableSwap),
    /// Weighted geometric mean.
    Weighted(Weighted),
}

impl CurveStrategy {
    /// Builds the curve named by `params`.
    ///
    /// # Errors
    ///
    /// - Propagates [`CurveParameters::validate`] failures.
    /// - [`AmmError::InvalidPrecision`] if a stable pool's token has more
    ///   decimals than the engine's stable precision.
    pub fn from_params(
        params: &CurveParameters,
        token_pair: &TokenPair,
        engine: &EngineConfig,
    ) -> Result<Self> {
        params.validate(engine)?;
        let fee = params.fee();
        Ok(match params.kind() {
            CurveKind::ConstantProduct => Self::ConstantProduct(ConstantProduct::new(fee)),
            CurveKind::Stable { amplification } => {
                Self::Stable(StableSwap::new(amplification, fee, token_pair, engine)?)
            }
            CurveKind::Weighted { weight0, weight1 } => {
                Self::Weighted(Weighted::new(weight0, weight1, fee))
            }
        })
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        match self {
            Self::ConstantProduct(curve) => curve.fee(),
            Self::Stable(curve) => curve.fee(),
            Self::Weighted(curve) => curve.fee(),
        }
    }
}

impl Invariant for CurveStrategy {
    fn amount_out(
        &self,
        reserves: &Reserves,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<SwapQuote> {
        match self {
            Self::ConstantProduct(curve) => curve.amount_out(reserves, direction, amount_in),
            Self::Stable(curve) => curve.amount_out(reserves, direction, amount_in),
            Self::Weighted(curve) => curve.amount_out(reserves, direction, amount_in),
        }
    }

    fn amount_in(
        &self,
        reserves: &Reserves,
        direction: SwapDirection,
        amount_out: Amount,
    ) -> Result<SwapQuote> {
        match self {
            Self::ConstantProduct(curve) => curve.amount_in(reserves, direction, amount_out),
            Self::Stable(curve) => curve.amount_in(reserves, direction, amount_out),
            Self::Weighted(curve) => curve.amount_in(reserves, direction, amount_out),
        }
    }

    fn mint_shares(
        &self,
        reserves: &Reserves,
        total_shares: Liquidity,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<ShareMint> {
        match self {
            Self::ConstantProduct(curve) => curve.mint_shares(reserves, total_shares, amount0, amount1),
            Self::Stable(curve) => curve.mint_shares(reserves, total_shares, amount0, amount1),
            Self::Weighted(curve) => curve.mint_shares(reserves, total_shares, amount0, amount1),
        }
    }
}

// -- shared helpers ---------------------------------------------------------

/// Splits `amount_in` into `(net, fee)`; the net part is rounded down.
pub(crate) fn take_fee(amount_in: Amount, fee: BasisPoints) -> Result<(Amount, Amount)> {
    let complement = fee.complement().ok_or(AmmError::InvalidSwapFee {
        fee: fee.get(),
        max: BasisPoints::DENOMINATOR,
    })?;
    let net = complement.apply(amount_in, Rounding::Down)?;
    let fee_amount = amount_in.checked_sub(net, "fee split")?;
    Ok((net, fee_amount))
}

/// Smallest gross input whose net part covers `net`.
pub(crate) fn gross_up(net: Amount, fee: BasisPoints) -> Result<Amount> {
    let complement = fee
        .complement()
        .filter(|c| c.get() > 0)
        .ok_or(AmmError::InvalidSwapFee {
            fee: fee.get(),
            max: BasisPoints::DENOMINATOR - 1,
        })?;
    mul_div_u128(
        net.get(),
        u128::from(BasisPoints::DENOMINATOR),
        u128::from(complement.get()),
        Rounding::Up,
    )
    .map(Amount::new)
}

pub(crate) fn ensure_swappable(reserve_in: Amount, reserve_out: Amount, amount: Amount) -> Result<()> {
    if amount.is_zero() {
        return Err(AmmError::InsufficientInput {
            reason: "swap amount must be positive",
            amount: amount.get(),
        });
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InsufficientLiquidity {
            reason: "reserve is empty",
            available: reserve_in.min(reserve_out).as_u256(),
        });
    }
    Ok(())
}

/// First deposit of a geometric-mean curve: `sqrt(a0 * a1)`, less the lock.
pub(crate) fn geometric_first_mint(amount0: Amount, amount1: Amount) -> Result<ShareMint> {
    let root = sqrt(amount0.as_u256() * amount1.as_u256());
    lock_minimum(Amount::from_u256(root)?.get())
}

/// Later deposit of a geometric-mean curve: the smaller proportional share.
pub(crate) fn proportional_mint(
    reserves: &Reserves,
    total_shares: Liquidity,
    amount0: Amount,
    amount1: Amount,
) -> Result<ShareMint> {
    let total = total_shares.get();
    let share0 = mul_div_u128(amount0.get(), total, reserves.reserve0.get(), Rounding::Down)?;
    let share1 = mul_div_u128(amount1.get(), total, reserves.reserve1.get(), Rounding::Down)?;
    let minted = share0.min(share1);
    if minted == 0 {
        return Err(AmmError::InsufficientInput {
            reason: "deposit is worth no shares",
            amount: amount0.get().max(amount1.get()),
        });
    }
    Ok(ShareMint {
        minted: Liquidity::new(minted),
        locked: Liquidity::ZERO,
    })
}

pub(crate) fn lock_minimum(shares: u128) -> Result<ShareMint> {
    if shares <= MINIMUM_LIQUIDITY {
        return Err(AmmError::InsufficientInput {
            reason: "initial deposit must exceed the minimum liquidity",
            amount: shares,
        });
    }
    Ok(ShareMint {
        minted: Liquidity::new(shares - MINIMUM_LIQUIDITY),
        locked: Liquidity::new(MINIMUM_LIQUIDITY),
    })
}

/// Reserves owed for burning `shares` out of `total_shares`, rounded down.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidityOwned`] if `shares > total_shares`.
/// - Numeric kernel failures.
pub fn proportional_withdrawal(
    reserves: &Reserves,
    total_shares: Liquidity,
    shares: Liquidity,
) -> Result<(Amount, Amount)> {
    if shares > total_shares {
        return Err(AmmError::InsufficientLiquidityOwned {
            requested: shares.get(),
            owned: total_shares.get(),
        });
    }
    let total = total_shares.get();
    let share = shares.get();
    Ok((
        Amount::new(mul_div_u128(reserves.reserve0.get(), share, total, Rounding::Down)?),
        Amount::new(mul_div_u128(reserves.reserve1.get(), share, total, Rounding::Down)?),
    ))
}

/// Widens a `u128` into the kernel width.
#[inline]
pub(crate) fn wide(value: u128) -> U256 {
    U256::from(value)
}
