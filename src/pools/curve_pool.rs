//! Reserve-curve pool.
//!
//! Holds two reserves priced by one [`CurveStrategy`] and issues fungible
//! shares to providers. The first deposit locks
//! [`MINIMUM_LIQUIDITY`](crate::curves::MINIMUM_LIQUIDITY) shares so the
//! share price can never be reset by draining the pool.
//!
//! Every mutating operation computes its new state in locals and assigns
//! it only once all checks have passed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CurvePoolConfig, EngineConfig};
use crate::curves::{proportional_withdrawal, CurveStrategy, Invariant, SwapQuote};
use crate::domain::{
    Address, Amount, BasisPoints, BurnReceipt, Liquidity, MintReceipt, PoolCounters, Reserves,
    SwapCompletion, SwapDirection, SwapLimit, SwapReceipt, SwapRequest, TokenPair,
};
use crate::error::{AmmError, Result};
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

/// Tokens offered for new shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShareDeposit {
    /// Token0 offered.
    pub amount0: Amount,
    /// Token1 offered.
    pub amount1: Amount,
}

impl ShareDeposit {
    /// Deposit of both tokens.
    #[must_use]
    pub const fn new(amount0: Amount, amount1: Amount) -> Self {
        Self { amount0, amount1 }
    }
}

/// Shares to redeem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareWithdrawal {
    /// Holder of the shares.
    pub owner: Address,
    /// Shares burned.
    pub shares: Liquidity,
}

/// Constant-product, stable or weighted pool with share accounting.
///
/// # Examples
///
/// ```
/// use tick_amm::prelude::*;
///
/// let engine = EngineConfig::default();
/// let pair = TokenPair::new(
///     Token::new(Address::from_bytes([1; 32]), Decimals::MAX),
///     Token::new(Address::from_bytes([2; 32]), Decimals::MAX),
/// )?;
/// let params = CurveParameters::new(CurveKind::ConstantProduct, BasisPoints::new(30), &engine)?;
/// let config = CurvePoolConfig::new(pair, params, &engine)?;
/// let mut pool = CurvePool::from_config(&config, &engine)?;
///
/// let provider = Address::from_bytes([7; 32]);
/// pool.mint(
///     &ShareDeposit::new(Amount::new(1_000_000), Amount::new(1_000_000)),
///     Liquidity::ZERO,
///     provider,
/// )?;
/// let receipt = pool.swap(&SwapRequest::new(Amount::new(1_000), SwapDirection::ZeroForOne, provider))?;
/// assert_eq!(receipt.amount_out, Amount::new(996));
/// # Ok::<(), tick_amm::error::AmmError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurvePool {
    config: CurvePoolConfig,
    curve: CurveStrategy,
    reserves: Reserves,
    total_shares: Liquidity,
    locked_shares: Liquidity,
    balances: BTreeMap<Address, Liquidity>,
    counters: PoolCounters,
}

impl CurvePool {
    /// Configuration the pool was built from.
    #[must_use]
    pub const fn config(&self) -> &CurvePoolConfig {
        &self.config
    }

    /// Pricing curve.
    #[must_use]
    pub const fn curve(&self) -> &CurveStrategy {
        &self.curve
    }

    /// Shares outstanding, locked shares included.
    #[must_use]
    pub const fn total_shares(&self) -> Liquidity {
        self.total_shares
    }

    /// Shares locked by the first deposit.
    #[must_use]
    pub const fn locked_shares(&self) -> Liquidity {
        self.locked_shares
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn shares_of(&self, owner: &Address) -> Liquidity {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    /// Input, fee included, needed to receive exactly `amount_out`.
    ///
    /// # Errors
    ///
    /// Propagates [`Invariant::amount_in`] failures.
    pub fn quote_amount_in(&self, direction: SwapDirection, amount_out: Amount) -> Result<SwapQuote> {
        self.curve.amount_in(&self.reserves, direction, amount_out)
    }
}

impl FromConfig<CurvePoolConfig> for CurvePool {
    fn from_config(config: &CurvePoolConfig, engine: &EngineConfig) -> Result<Self> {
        engine.validate()?;
        config.validate(engine)?;
        let curve = CurveStrategy::from_params(&config.params(), config.token_pair(), engine)?;
        debug!(kind = ?config.params().kind(), fee = %config.params().fee(), "curve pool created");
        Ok(Self {
            config: *config,
            curve,
            reserves: Reserves::default(),
            total_shares: Liquidity::ZERO,
            locked_shares: Liquidity::ZERO,
            balances: BTreeMap::new(),
            counters: PoolCounters::default(),
        })
    }
}

impl SwapPool for CurvePool {
    fn swap(&mut self, request: &SwapRequest) -> Result<SwapReceipt> {
        request.validate()?;
        if matches!(request.limit, SwapLimit::SqrtPrice(_)) {
            return Err(AmmError::InvalidPrice(
                "sqrt price limits apply to concentrated pools only",
            ));
        }
        let quote = self
            .curve
            .amount_out(&self.reserves, request.direction, request.amount_in)?;
        request.check_minimum_out(quote.amount_out)?;

        let mut reserves = self.reserves;
        reserves.settle_swap(request.direction, quote.amount_in, quote.amount_out)?;
        let mut counters = self.counters;
        counters.record_swap(request.direction, quote.amount_in, quote.amount_out, quote.fee)?;

        self.reserves = reserves;
        self.counters = counters;
        debug!(
            direction = ?request.direction,
            amount_in = quote.amount_in.get(),
            amount_out = quote.amount_out.get(),
            fee = quote.fee.get(),
            "curve pool swap"
        );
        Ok(SwapReceipt {
            recipient: request.recipient,
            direction: request.direction,
            amount_in: quote.amount_in,
            amount_out: quote.amount_out,
            fee: quote.fee,
            crossings: Vec::new(),
            sqrt_price: None,
            completion: SwapCompletion::Filled,
        })
    }

    fn quote_amount_out(&self, direction: SwapDirection, amount_in: Amount) -> Result<Amount> {
        self.curve
            .amount_out(&self.reserves, direction, amount_in)
            .map(|quote| quote.amount_out)
    }

    fn token_pair(&self) -> &TokenPair {
        self.config.token_pair()
    }

    fn fee(&self) -> BasisPoints {
        self.curve.fee()
    }

    fn reserves(&self) -> Reserves {
        self.reserves
    }

    fn counters(&self) -> &PoolCounters {
        &self.counters
    }
}

impl LiquidityPool for CurvePool {
    type Deposit = ShareDeposit;
    type Withdrawal = ShareWithdrawal;

    fn mint(
        &mut self,
        deposit: &ShareDeposit,
        minimum: Liquidity,
        recipient: Address,
    ) -> Result<MintReceipt> {
        let minted = self.curve.mint_shares(
            &self.reserves,
            self.total_shares,
            deposit.amount0,
            deposit.amount1,
        )?;
        if minted.minted < minimum {
            return Err(AmmError::SlippageExceeded {
                minimum: minimum.get(),
                actual: minted.minted.get(),
            });
        }

        let mut reserves = self.reserves;
        reserves.deposit(deposit.amount0, deposit.amount1)?;
        let total_shares = self
            .total_shares
            .checked_add(minted.minted)
            .and_then(|t| t.checked_add(minted.locked))
            .ok_or(AmmError::Overflow("total shares"))?;
        let balance = self
            .shares_of(&recipient)
            .checked_add(minted.minted)
            .ok_or(AmmError::Overflow("share balance"))?;
        let locked_shares = self
            .locked_shares
            .checked_add(minted.locked)
            .ok_or(AmmError::Overflow("locked shares"))?;

        self.reserves = reserves;
        self.total_shares = total_shares;
        self.locked_shares = locked_shares;
        self.balances.insert(recipient, balance);
        debug!(
            recipient = %recipient,
            minted = minted.minted.get(),
            locked = minted.locked.get(),
            amount0 = deposit.amount0.get(),
            amount1 = deposit.amount1.get(),
            "curve pool mint"
        );
        Ok(MintReceipt {
            recipient,
            minted: minted.minted,
            amount0: deposit.amount0,
            amount1: deposit.amount1,
        })
    }

    fn burn(&mut self, withdrawal: &ShareWithdrawal, recipient: Address) -> Result<BurnReceipt> {
        if withdrawal.shares.is_zero() {
            return Err(AmmError::InsufficientInput {
                reason: "burn amount is zero",
                amount: 0,
            });
        }
        let owned = self.shares_of(&withdrawal.owner);
        let Some(left) = owned.checked_sub(withdrawal.shares) else {
            return Err(AmmError::InsufficientLiquidityOwned {
                requested: withdrawal.shares.get(),
                owned: owned.get(),
            });
        };
        let (amount0, amount1) =
            proportional_withdrawal(&self.reserves, self.total_shares, withdrawal.shares)?;

        let mut reserves = self.reserves;
        reserves.withdraw(amount0, amount1)?;
        let total_shares = self
            .total_shares
            .checked_sub(withdrawal.shares)
            .ok_or(AmmError::Overflow("total shares below zero"))?;

        self.reserves = reserves;
        self.total_shares = total_shares;
        if left.is_zero() {
            self.balances.remove(&withdrawal.owner);
        } else {
            self.balances.insert(withdrawal.owner, left);
        }
        debug!(
            owner = %withdrawal.owner,
            burned = withdrawal.shares.get(),
            amount0 = amount0.get(),
            amount1 = amount1.get(),
            "curve pool burn"
        );
        Ok(BurnReceipt {
            recipient,
            burned: withdrawal.shares,
            amount0,
            amount1,
        })
    }

    fn total_liquidity(&self) -> Liquidity {
        self.total_shares
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{CurveKind, CurveParameters};
    use crate::curves::MINIMUM_LIQUIDITY;
    use crate::domain::{Decimals, SqrtPrice, Token};

    fn pair() -> TokenPair {
        let Ok(pair) = TokenPair::new(
            Token::new(Address::from_bytes([1; 32]), Decimals::MAX),
            Token::new(Address::from_bytes([2; 32]), Decimals::MAX),
        ) else {
            panic!("distinct tokens");
        };
        pair
    }

    fn pool(kind: CurveKind, fee: u32) -> CurvePool {
        let engine = EngineConfig::default();
        let Ok(params) = CurveParameters::new(kind, BasisPoints::new(fee), &engine) else {
            panic!("valid params");
        };
        let Ok(config) = CurvePoolConfig::new(pair(), params, &engine) else {
            panic!("valid config");
        };
        let Ok(pool) = CurvePool::from_config(&config, &engine) else {
            panic!("pool builds");
        };
        pool
    }

    fn lp() -> Address {
        Address::from_bytes([7; 32])
    }

    fn seeded(kind: CurveKind, fee: u32, r0: u128, r1: u128) -> CurvePool {
        let mut pool = pool(kind, fee);
        let Ok(_) = pool.mint(
            &ShareDeposit::new(Amount::new(r0), Amount::new(r1)),
            Liquidity::ZERO,
            lp(),
        ) else {
            panic!("seed mint");
        };
        pool
    }

    fn request(amount: u128, direction: SwapDirection) -> SwapRequest {
        SwapRequest::new(Amount::new(amount), direction, lp())
    }

    // -- mint / burn --------------------------------------------------------

    #[test]
    fn first_mint_locks_minimum() {
        let pool = seeded(CurveKind::ConstantProduct, 30, 1_000_000, 1_000_000);
        assert_eq!(pool.total_shares(), Liquidity::new(1_000_000));
        assert_eq!(pool.locked_shares(), Liquidity::new(MINIMUM_LIQUIDITY));
        assert_eq!(pool.shares_of(&lp()), Liquidity::new(1_000_000 - MINIMUM_LIQUIDITY));
    }

    #[test]
    fn mint_below_minimum_is_rejected_without_change() {
        let mut pool = seeded(CurveKind::ConstantProduct, 30, 1_000_000, 1_000_000);
        let before = pool.clone();
        let result = pool.mint(
            &ShareDeposit::new(Amount::new(1_000), Amount::new(1_000)),
            Liquidity::new(1_001),
            lp(),
        );
        assert_eq!(
            result,
            Err(AmmError::SlippageExceeded {
                minimum: 1_001,
                actual: 1_000
            })
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn burn_returns_proportional_reserves() {
        let mut pool = seeded(CurveKind::ConstantProduct, 30, 4_000_000, 1_000_000);
        let shares = pool.shares_of(&lp());
        let Ok(receipt) = pool.burn(&ShareWithdrawal { owner: lp(), shares }, lp()) else {
            panic!("expected Ok");
        };
        // 1000 of 2_000_000 shares stay locked
        assert_eq!(receipt.amount0, Amount::new(3_998_000));
        assert_eq!(receipt.amount1, Amount::new(999_500));
        assert_eq!(pool.total_shares(), Liquidity::new(MINIMUM_LIQUIDITY));
        assert_eq!(pool.shares_of(&lp()), Liquidity::ZERO);
    }

    #[test]
    fn burning_more_than_owned_fails() {
        let mut pool = seeded(CurveKind::ConstantProduct, 30, 1_000_000, 1_000_000);
        let stranger = Address::from_bytes([8; 32]);
        let result = pool.burn(
            &ShareWithdrawal {
                owner: stranger,
                shares: Liquidity::new(1),
            },
            stranger,
        );
        assert_eq!(
            result,
            Err(AmmError::InsufficientLiquidityOwned {
                requested: 1,
                owned: 0
            })
        );
    }

    // -- swap ---------------------------------------------------------------

    #[test]
    fn constant_product_reference_swap() {
        let mut pool = seeded(CurveKind::ConstantProduct, 30, 1_000_000, 1_000_000);
        let Ok(receipt) = pool.swap(&request(1_000, SwapDirection::ZeroForOne)) else {
            panic!("expected Ok");
        };
        assert_eq!(receipt.amount_out, Amount::new(996));
        assert_eq!(receipt.fee, Amount::new(3));
        assert_eq!(
            pool.reserves(),
            Reserves::new(Amount::new(1_001_000), Amount::new(999_004))
        );
        assert_eq!(pool.counters().swaps, 1);
        assert_eq!(pool.counters().volume0, 1_000);
        assert_eq!(pool.counters().fees0, 3);
    }

    #[test]
    fn stable_pool_swaps_near_par() {
        let mut pool = seeded(
            CurveKind::Stable { amplification: 100 },
            4,
            1_000_000_000_000_000,
            1_000_000_000_000_000,
        );
        let Ok(receipt) = pool.swap(&request(1_000_000_000, SwapDirection::OneForZero)) else {
            panic!("expected Ok");
        };
        assert_eq!(receipt.amount_out, Amount::new(999_599_990));
    }

    #[test]
    fn minimum_out_aborts_swap() {
        let mut pool = seeded(CurveKind::Weighted { weight0: 80, weight1: 20 }, 30, 4_000_000, 1_000_000);
        let before = pool.clone();
        let req = request(10_000, SwapDirection::ZeroForOne)
            .with_limit(SwapLimit::MinimumOut(Amount::new(1_000_000)));
        assert!(matches!(pool.swap(&req), Err(AmmError::SlippageExceeded { .. })));
        assert_eq!(pool, before);
    }

    #[test]
    fn sqrt_price_limit_rejected() {
        let mut pool = seeded(CurveKind::ConstantProduct, 30, 1_000_000, 1_000_000);
        let req = request(10, SwapDirection::ZeroForOne).with_limit(SwapLimit::SqrtPrice(SqrtPrice::unit()));
        assert!(matches!(pool.swap(&req), Err(AmmError::InvalidPrice(_))));
    }

    #[test]
    fn empty_pool_cannot_swap() {
        let mut pool = pool(CurveKind::ConstantProduct, 30);
        assert!(matches!(
            pool.swap(&request(10, SwapDirection::ZeroForOne)),
            Err(AmmError::InsufficientLiquidity { .. })
        ));
    }

    #[test]
    fn exact_out_quote_is_sufficient() {
        let pool = seeded(CurveKind::ConstantProduct, 30, 1_000_000, 2_000_000);
        let Ok(quote) = pool.quote_amount_in(SwapDirection::OneForZero, Amount::new(5_000)) else {
            panic!("expected Ok");
        };
        let Ok(out) = pool.quote_amount_out(SwapDirection::OneForZero, quote.amount_in) else {
            panic!("expected Ok");
        };
        assert!(out >= Amount::new(5_000));
    }
}
