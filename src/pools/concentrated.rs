//! Tick-ranged concentrated-liquidity pool.
//!
//! Couples [`LiquidityAccounting`] with the pool price and reserves.
//! Within one initialized-tick segment the pool behaves as a constant
//! product over virtual reserves set by the active liquidity `L`:
//!
//! ```text
//! amount0 = L * (1/sqrt(p_a) - 1/sqrt(p_b))
//! amount1 = L * (sqrt(p_b) - sqrt(p_a))
//! ```
//!
//! Mint, burn, collect and swap run against a draft of the accounting and
//! commit only on success.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::concentrated::{LiquidityAccounting, Position, StepOutcome, SwapStepper, TickIter, TickRecord};
use crate::config::{ConcentratedConfig, EngineConfig};
use crate::domain::{
    Address, Amount, BasisPoints, BurnReceipt, FeeCollection, Liquidity, MintReceipt,
    PoolCounters, Reserves, Rounding, SqrtPrice, SwapDirection, SwapLimit, SwapReceipt,
    SwapRequest, Tick, TickRange, TokenPair,
};
use crate::error::{AmmError, Result};
use crate::math::liquidity_math::{amounts_for_liquidity, liquidity_for_amounts};
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

/// How a range deposit is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeFunding {
    /// Exact liquidity; the token amounts follow from the price.
    Liquidity(Liquidity),
    /// The largest liquidity these amounts can fund.
    Amounts {
        /// Token0 available.
        amount0: Amount,
        /// Token1 available.
        amount1: Amount,
    },
}

/// Liquidity offered over a tick range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDeposit {
    /// Price range.
    pub range: TickRange,
    /// Sizing.
    pub funding: RangeFunding,
    /// Initialized tick at or below which the lower tick's insertion
    /// scan starts.
    pub lower_hint: Option<Tick>,
}

impl RangeDeposit {
    /// Deposit of an exact liquidity amount.
    #[must_use]
    pub const fn liquidity(range: TickRange, liquidity: Liquidity) -> Self {
        Self {
            range,
            funding: RangeFunding::Liquidity(liquidity),
            lower_hint: None,
        }
    }

    /// Deposit sized by available token amounts.
    #[must_use]
    pub const fn amounts(range: TickRange, amount0: Amount, amount1: Amount) -> Self {
        Self {
            range,
            funding: RangeFunding::Amounts { amount0, amount1 },
            lower_hint: None,
        }
    }

    /// Sets the insertion hint for the lower tick.
    #[must_use]
    pub const fn with_hint(mut self, hint: Tick) -> Self {
        self.lower_hint = Some(hint);
        self
    }
}

/// Liquidity to remove from a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeWithdrawal {
    /// Position owner.
    pub owner: Address,
    /// Position range.
    pub range: TickRange,
    /// Liquidity removed.
    pub liquidity: Liquidity,
}

/// Concentrated-liquidity pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcentratedPool {
    config: ConcentratedConfig,
    sqrt_price: SqrtPrice,
    tick: Tick,
    accounting: LiquidityAccounting,
    reserves: Reserves,
    counters: PoolCounters,
}

impl ConcentratedPool {
    /// Configuration the pool was built from.
    #[must_use]
    pub const fn config(&self) -> &ConcentratedConfig {
        &self.config
    }

    /// Current sqrt price.
    #[must_use]
    pub const fn sqrt_price(&self) -> SqrtPrice {
        self.sqrt_price
    }

    /// Tick of the current sqrt price.
    #[must_use]
    pub const fn current_tick(&self) -> Tick {
        self.tick
    }

    /// Liquidity in range at the current price.
    #[must_use]
    pub const fn active_liquidity(&self) -> Liquidity {
        self.accounting.active_liquidity()
    }

    /// Position of `owner` over `range`.
    #[must_use]
    pub fn position(&self, owner: &Address, range: TickRange) -> Option<&Position> {
        self.accounting.position(owner, range)
    }

    /// Record of an initialized tick.
    #[must_use]
    pub fn tick(&self, tick: Tick) -> Option<&TickRecord> {
        self.accounting.ledger().get(tick)
    }

    /// Initialized ticks in ascending order, sentinels included.
    pub fn ticks(&self) -> TickIter<'_> {
        self.accounting.ledger().iter()
    }

    /// Positions, ticks and fee growth.
    #[must_use]
    pub const fn accounting(&self) -> &LiquidityAccounting {
        &self.accounting
    }

    /// Largest liquidity `amount0` and `amount1` can fund over `range` at
    /// the current price.
    ///
    /// # Errors
    ///
    /// Propagates [`liquidity_for_amounts`] failures.
    pub fn liquidity_for_amounts(
        &self,
        range: TickRange,
        amount0: Amount,
        amount1: Amount,
    ) -> Result<Liquidity> {
        let (lower, upper) = range_prices(range)?;
        liquidity_for_amounts(
            self.sqrt_price.get(),
            lower.get(),
            upper.get(),
            amount0.get(),
            amount1.get(),
        )
        .map(Liquidity::new)
    }

    /// Token amounts backing `liquidity` over `range` at the current price.
    ///
    /// # Errors
    ///
    /// Propagates [`amounts_for_liquidity`] failures.
    pub fn amounts_for_liquidity(
        &self,
        range: TickRange,
        liquidity: Liquidity,
        rounding: Rounding,
    ) -> Result<(Amount, Amount)> {
        let (lower, upper) = range_prices(range)?;
        let (amount0, amount1) = amounts_for_liquidity(
            self.sqrt_price.get(),
            lower.get(),
            upper.get(),
            liquidity.get(),
            rounding,
        )?;
        Ok((Amount::from_u256(amount0)?, Amount::from_u256(amount1)?))
    }

    /// Pays out the fees owed to `owner`'s position over `range`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PositionNotFound`] if there is no such position.
    /// - [`AmmError::Overflow`] if the reserves cannot cover the fees.
    pub fn collect(
        &mut self,
        owner: &Address,
        range: TickRange,
        recipient: Address,
    ) -> Result<FeeCollection> {
        let mut accounting = self.accounting.clone();
        let (amount0, amount1) = accounting.collect(*owner, range)?;
        let mut reserves = self.reserves;
        reserves.withdraw(amount0, amount1)?;

        self.accounting = accounting;
        self.reserves = reserves;
        debug!(
            owner = %owner,
            lower = range.lower().get(),
            upper = range.upper().get(),
            amount0 = amount0.get(),
            amount1 = amount1.get(),
            "concentrated pool collect"
        );
        Ok(FeeCollection {
            recipient,
            amount0,
            amount1,
        })
    }

    /// Checks `range` against the engine bounds and the tick spacing.
    fn validate_range(&self, range: TickRange) -> Result<()> {
        let ledger = self.accounting.ledger();
        let spacing = self.config.fee_tier().tick_spacing();
        for tick in [range.lower(), range.upper()] {
            if !ledger.bounds().contains(tick) {
                return Err(AmmError::InvalidTick {
                    tick: tick.get(),
                    reason: "outside the configured tick bounds",
                });
            }
            if !ledger.is_sentinel(tick) && !tick.is_multiple_of(spacing) {
                return Err(AmmError::InvalidTick {
                    tick: tick.get(),
                    reason: "not a multiple of the tick spacing",
                });
            }
        }
        Ok(())
    }

    fn limit_price(request: &SwapRequest) -> Option<SqrtPrice> {
        match request.limit {
            SwapLimit::SqrtPrice(limit) => Some(limit),
            SwapLimit::None | SwapLimit::MinimumOut(_) => None,
        }
    }

    fn simulate(
        &self,
        accounting: &mut LiquidityAccounting,
        direction: SwapDirection,
        amount_in: Amount,
        limit: Option<SqrtPrice>,
    ) -> Result<StepOutcome> {
        SwapStepper::new(
            accounting,
            self.sqrt_price,
            self.config.fee_tier().fee(),
            direction,
            amount_in,
            limit,
        )?
        .run()
    }
}

fn range_prices(range: TickRange) -> Result<(SqrtPrice, SqrtPrice)> {
    Ok((
        SqrtPrice::from_tick(range.lower())?,
        SqrtPrice::from_tick(range.upper())?,
    ))
}

impl FromConfig<ConcentratedConfig> for ConcentratedPool {
    fn from_config(config: &ConcentratedConfig, engine: &EngineConfig) -> Result<Self> {
        engine.validate()?;
        config.validate(engine)?;
        let sqrt_price = config.initial_sqrt_price();
        let tick = sqrt_price.tick()?;
        debug!(
            fee = %config.fee_tier().fee(),
            tick_spacing = config.fee_tier().tick_spacing(),
            tick = tick.get(),
            "concentrated pool created"
        );
        Ok(Self {
            config: *config,
            sqrt_price,
            tick,
            accounting: LiquidityAccounting::new(engine.tick_bounds()),
            reserves: Reserves::default(),
            counters: PoolCounters::default(),
        })
    }
}

impl SwapPool for ConcentratedPool {
    fn swap(&mut self, request: &SwapRequest) -> Result<SwapReceipt> {
        request.validate()?;
        let mut accounting = self.accounting.clone();
        let outcome = self.simulate(
            &mut accounting,
            request.direction,
            request.amount_in,
            Self::limit_price(request),
        )?;
        request.check_minimum_out(outcome.amount_out)?;

        let mut reserves = self.reserves;
        reserves.settle_swap(request.direction, outcome.amount_in, outcome.amount_out)?;
        let mut counters = self.counters;
        counters.record_swap(
            request.direction,
            outcome.amount_in,
            outcome.amount_out,
            outcome.fee,
        )?;

        self.accounting = accounting;
        self.reserves = reserves;
        self.counters = counters;
        self.sqrt_price = outcome.sqrt_price;
        self.tick = outcome.tick;
        debug!(
            direction = ?request.direction,
            amount_in = outcome.amount_in.get(),
            amount_out = outcome.amount_out.get(),
            fee = outcome.fee.get(),
            crossings = outcome.crossings.len(),
            tick = outcome.tick.get(),
            completion = ?outcome.completion,
            "concentrated pool swap"
        );
        Ok(SwapReceipt {
            recipient: request.recipient,
            direction: request.direction,
            amount_in: outcome.amount_in,
            amount_out: outcome.amount_out,
            fee: outcome.fee,
            crossings: outcome.crossings,
            sqrt_price: Some(outcome.sqrt_price),
            completion: outcome.completion,
        })
    }

    fn quote_amount_out(&self, direction: SwapDirection, amount_in: Amount) -> Result<Amount> {
        let mut scratch = self.accounting.clone();
        self.simulate(&mut scratch, direction, amount_in, None)
            .map(|outcome| outcome.amount_out)
    }

    fn token_pair(&self) -> &TokenPair {
        self.config.token_pair()
    }

    fn fee(&self) -> BasisPoints {
        self.config.fee_tier().fee()
    }

    fn reserves(&self) -> Reserves {
        self.reserves
    }

    fn counters(&self) -> &PoolCounters {
        &self.counters
    }
}

impl LiquidityPool for ConcentratedPool {
    type Deposit = RangeDeposit;
    type Withdrawal = RangeWithdrawal;

    fn mint(
        &mut self,
        deposit: &RangeDeposit,
        minimum: Liquidity,
        recipient: Address,
    ) -> Result<MintReceipt> {
        let range = deposit.range;
        self.validate_range(range)?;
        let liquidity = match deposit.funding {
            RangeFunding::Liquidity(liquidity) => liquidity,
            RangeFunding::Amounts { amount0, amount1 } => {
                self.liquidity_for_amounts(range, amount0, amount1)?
            }
        };
        if liquidity < minimum {
            return Err(AmmError::SlippageExceeded {
                minimum: minimum.get(),
                actual: liquidity.get(),
            });
        }

        let mut accounting = self.accounting.clone();
        accounting.add(recipient, range, liquidity, deposit.lower_hint, self.tick)?;
        let (amount0, amount1) = self.amounts_for_liquidity(range, liquidity, Rounding::Up)?;
        let mut reserves = self.reserves;
        reserves.deposit(amount0, amount1)?;

        self.accounting = accounting;
        self.reserves = reserves;
        debug!(
            recipient = %recipient,
            lower = range.lower().get(),
            upper = range.upper().get(),
            liquidity = liquidity.get(),
            amount0 = amount0.get(),
            amount1 = amount1.get(),
            "concentrated pool mint"
        );
        Ok(MintReceipt {
            recipient,
            minted: liquidity,
            amount0,
            amount1,
        })
    }

    fn burn(&mut self, withdrawal: &RangeWithdrawal, recipient: Address) -> Result<BurnReceipt> {
        let range = withdrawal.range;
        let mut accounting = self.accounting.clone();
        accounting.remove(withdrawal.owner, range, withdrawal.liquidity)?;
        let (amount0, amount1) =
            self.amounts_for_liquidity(range, withdrawal.liquidity, Rounding::Down)?;
        let mut reserves = self.reserves;
        reserves.withdraw(amount0, amount1)?;

        self.accounting = accounting;
        self.reserves = reserves;
        debug!(
            owner = %withdrawal.owner,
            lower = range.lower().get(),
            upper = range.upper().get(),
            liquidity = withdrawal.liquidity.get(),
            amount0 = amount0.get(),
            amount1 = amount1.get(),
            "concentrated pool burn"
        );
        Ok(BurnReceipt {
            recipient,
            burned: withdrawal.liquidity,
            amount0,
            amount1,
        })
    }

    fn total_liquidity(&self) -> Liquidity {
        self.accounting.active_liquidity()
    }
}
