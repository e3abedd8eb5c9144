//! Amplified-sum curve for pegged assets (Curve StableSwap, two coins).
//!
//! Balances are first lifted to a common precision. The invariant `D`
//! satisfies
//!
//! ```text
//! A * n^n * (x + y) + D = A * n^n * D + D^(n+1) / (n^n * x * y)
//! ```
//!
//! with `Ann = A * n`. Both `D` and the post-swap balance are found by
//! Newton-Raphson. A solve that does not settle within the configured
//! iteration cap fails with [`AmmError::ConvergenceFailure`].

use primitive_types::U256;
use tracing::warn;

use super::{ensure_swappable, gross_up, lock_minimum, take_fee, wide, Invariant, ShareMint, SwapQuote};
use crate::config::EngineConfig;
use crate::domain::{Amount, BasisPoints, Liquidity, Reserves, SwapDirection, TokenPair};
use crate::error::{AmmError, Result};
use crate::math::{div_rounding_up, mul_add_div, mul_div, SafeCast};

const COINS: u32 = 2;

fn checked_mul(a: U256, b: U256, context: &'static str) -> Result<U256> {
    a.checked_mul(b).ok_or(AmmError::Overflow(context))
}

/// Raw amount in the common precision.
fn lift(amount: Amount, scale: U256) -> Result<U256> {
    checked_mul(amount.as_u256(), scale, "stable normalization")
}

/// StableSwap pricing for two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StableSwap {
    amplification: u32,
    fee: BasisPoints,
    scale0: u128,
    scale1: u128,
    max_iterations: u32,
    tolerance: u32,
}

impl StableSwap {
    /// Creates the curve for `token_pair`, reading solver limits and the
    /// common precision from `engine`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] for a zero amplification.
    /// - [`AmmError::InvalidPrecision`] if a token has more decimals than
    ///   the common precision.
    pub fn new(
        amplification: u32,
        fee: BasisPoints,
        token_pair: &TokenPair,
        engine: &EngineConfig,
    ) -> Result<Self> {
        if amplification == 0 {
            return Err(AmmError::InvalidConfiguration("amplification must be positive"));
        }
        let precision = engine.stable_precision();
        Ok(Self {
            amplification,
            fee,
            scale0: token_pair.token0().decimals().scale_to(precision)?,
            scale1: token_pair.token1().decimals().scale_to(precision)?,
            max_iterations: engine.newton_iterations(),
            tolerance: engine.convergence_tolerance(),
        })
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }

    /// Amplification coefficient.
    #[must_use]
    pub const fn amplification(&self) -> u32 {
        self.amplification
    }

    fn ann(&self) -> U256 {
        U256::from(self.amplification) * U256::from(COINS)
    }

    fn converged(&self, current: U256, previous: U256) -> bool {
        let diff = if current > previous {
            current - previous
        } else {
            previous - current
        };
        diff <= U256::from(self.tolerance)
    }

    fn non_convergence(&self, solver: &'static str) -> AmmError {
        warn!(
            solver,
            iterations = self.max_iterations,
            amplification = self.amplification,
            "newton solve did not converge"
        );
        AmmError::ConvergenceFailure {
            solver,
            iterations: self.max_iterations,
        }
    }

    /// Invariant `D` of normalized balances `x` and `y`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] if either balance is zero.
    /// - [`AmmError::ConvergenceFailure`] past the iteration cap.
    /// - [`AmmError::Overflow`] for balances beyond the kernel width.
    pub fn compute_d(&self, x: U256, y: U256) -> Result<U256> {
        if x.is_zero() || y.is_zero() {
            return Err(AmmError::InsufficientLiquidity {
                reason: "stable invariant of an empty balance",
                available: x.min(y),
            });
        }
        let n = U256::from(COINS);
        let ann = self.ann();
        let sum = x.checked_add(y).ok_or(AmmError::Overflow("stable balance sum"))?;
        let ann_sum = checked_mul(ann, sum, "stable Ann * S")?;
        let x_n = checked_mul(x, n, "stable n * x")?;
        let y_n = checked_mul(y, n, "stable n * y")?;

        let mut d = sum;
        for _ in 0..self.max_iterations {
            let d_p = mul_div(mul_div(d, d, x_n)?, d, y_n)?;
            let previous = d;
            let numerator = ann_sum
                .checked_add(checked_mul(d_p, n, "stable D numerator")?)
                .ok_or(AmmError::Overflow("stable D numerator"))?;
            let denominator = checked_mul(ann - U256::one(), d, "stable D denominator")?
                .checked_add(checked_mul(d_p, n + U256::one(), "stable D denominator")?)
                .ok_or(AmmError::Overflow("stable D denominator"))?;
            d = mul_div(numerator, d, denominator)?;
            if self.converged(d, previous) {
                return Ok(d);
            }
        }
        Err(self.non_convergence("stable invariant"))
    }

    /// Balance of the other coin that keeps `D` when this coin holds `x`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] if `x` is zero.
    /// - [`AmmError::ConvergenceFailure`] past the iteration cap.
    pub fn compute_y(&self, x: U256, d: U256) -> Result<U256> {
        if x.is_zero() {
            return Err(AmmError::InsufficientLiquidity {
                reason: "stable balance of zero",
                available: x,
            });
        }
        let n = U256::from(COINS);
        let ann = self.ann();
        let c = mul_div(
            mul_div(d, d, checked_mul(x, n, "stable n * x")?)?,
            d,
            checked_mul(ann, n, "stable Ann * n")?,
        )?;
        let b = x
            .checked_add(d / ann)
            .ok_or(AmmError::Overflow("stable y offset"))?;

        let mut y = d;
        for _ in 0..self.max_iterations {
            let previous = y;
            let denominator = checked_mul(y, U256::from(2u8), "stable y denominator")?
                .checked_add(b)
                .and_then(|sum| sum.checked_sub(d))
                .ok_or(AmmError::Overflow("stable y denominator"))?;
            y = mul_add_div(y, y, c, denominator)?;
            if self.converged(y, previous) {
                return Ok(y);
            }
        }
        Err(self.non_convergence("stable balance"))
    }

    fn scales(&self, direction: SwapDirection) -> (U256, U256) {
        match direction {
            SwapDirection::ZeroForOne => (wide(self.scale0), wide(self.scale1)),
            SwapDirection::OneForZero => (wide(self.scale1), wide(self.scale0)),
        }
    }

    fn normalized(&self, reserves: &Reserves) -> Result<(U256, U256)> {
        Ok((
            lift(reserves.reserve0, wide(self.scale0))?,
            lift(reserves.reserve1, wide(self.scale1))?,
        ))
    }

    /// Output for a net (post-fee) input against oriented raw reserves.
    fn net_out(
        &self,
        net_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
        direction: SwapDirection,
    ) -> Result<Amount> {
        let (scale_in, scale_out) = self.scales(direction);
        let x = lift(reserve_in, scale_in)?;
        let y = lift(reserve_out, scale_out)?;
        let d = self.compute_d(x, y)?;
        let new_x = x
            .checked_add(lift(net_in, scale_in)?)
            .ok_or(AmmError::Overflow("stable input balance"))?;
        let new_y = self.compute_y(new_x, d)?;
        let out = y
            .checked_sub(new_y)
            .and_then(|dy| dy.checked_sub(U256::one()))
            .unwrap_or_default();
        Amount::from_u256(out / scale_out)
    }
}

impl Invariant for StableSwap {
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
        let (scale_in, scale_out) = self.scales(direction);
        let x = lift(reserve_in, scale_in)?;
        let y = lift(reserve_out, scale_out)?;
        let d = self.compute_d(x, y)?;
        let new_y = y - lift(amount_out, scale_out)?;
        let new_x = self.compute_y(new_y, d)?;
        let delta = new_x
            .checked_sub(x)
            .ok_or(AmmError::Overflow("stable input below reserve"))?;
        // one extra unit mirrors the unit withheld from every output
        let net = div_rounding_up(delta, scale_in)? + U256::one();
        let amount_in = gross_up(Amount::from_u256(net)?, self.fee)?;
        let fee = amount_in.checked_sub(Amount::from_u256(net)?, "stable fee")?;
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
        let mut after = *reserves;
        after.deposit(amount0, amount1)?;
        let (x1, y1) = self.normalized(&after)?;
        let d1 = self.compute_d(x1, y1).map_err(|err| match err {
            AmmError::InsufficientLiquidity { .. } => AmmError::InsufficientInput {
                reason: "first deposit requires both tokens",
                amount: amount0.get().min(amount1.get()),
            },
            other => other,
        })?;

        if total_shares.is_zero() {
            return lock_minimum(d1.safe_cast()?);
        }
        let (x0, y0) = self.normalized(reserves)?;
        let d0 = self.compute_d(x0, y0)?;
        let growth = d1.checked_sub(d0).unwrap_or_default();
        let minted: u128 = mul_div(wide(total_shares.get()), growth, d0)?.safe_cast()?;
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
}
