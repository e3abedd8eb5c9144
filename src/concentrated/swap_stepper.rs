//! Swap execution across initialized ticks.
//!
//! ```text
//!            input left, no limit hit            boundary reached
//! Active ─────────────────────────────▶ Stepping ───────────────▶ CrossingTick
//!   ▲  │                                    │                          │
//!   │  │ input spent or limit hit           │ stopped inside segment   │
//!   │  ▼                                    ▼                          │
//!   │ Done ◀────────────────────────────  Active ◀─────────────────────┘
//! ```
//!
//! Each `Stepping` transition swaps at constant liquidity up to the nearer
//! of the next initialized tick and the price limit. A step that starts
//! with no active liquidity fails the swap, and so does running into a
//! sentinel with input left; sentinels are never crossed.
//!
//! A downward swap that stops exactly on an initialized tick leaves it
//! uncrossed, so the tick stays current. The next downward swap crosses it
//! before moving the price.

use primitive_types::U256;
use tracing::trace;

use super::positions::LiquidityAccounting;
use crate::domain::{Amount, BasisPoints, SqrtPrice, SwapCompletion, SwapDirection, Tick, TickCrossing};
use crate::error::{AmmError, Result};
use crate::math::compute_swap_step;

/// Stepper state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// Deciding whether to continue.
    Active,
    /// Swapping within one segment.
    Stepping,
    /// Applying the crossing of an initialized tick.
    CrossingTick(Tick),
    /// Finished.
    Done(SwapCompletion),
}

/// Totals of a finished swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Final sqrt price.
    pub sqrt_price: SqrtPrice,
    /// Tick of the final sqrt price.
    pub tick: Tick,
    /// Input consumed, fee included.
    pub amount_in: Amount,
    /// Output produced.
    pub amount_out: Amount,
    /// Fee charged.
    pub fee: Amount,
    /// Ticks crossed, in crossing order.
    pub crossings: Vec<TickCrossing>,
    /// Fill status.
    pub completion: SwapCompletion,
}

/// Drives one swap over a [`LiquidityAccounting`].
///
/// The stepper mutates the accounting in place. Run it on a draft and
/// discard the draft when [`run`](Self::run) fails.
#[derive(Debug)]
pub struct SwapStepper<'a> {
    accounting: &'a mut LiquidityAccounting,
    direction: SwapDirection,
    fee: BasisPoints,
    sqrt_price: SqrtPrice,
    limit: Option<SqrtPrice>,
    requested: Amount,
    remaining: U256,
    amount_out: U256,
    fee_total: U256,
    crossings: Vec<TickCrossing>,
    state: StepState,
}

impl<'a> SwapStepper<'a> {
    /// Prepares a swap of `amount` from `sqrt_price`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInput`] if `amount` is zero.
    /// - [`AmmError::InvalidPrice`] if `limit` is not strictly ahead of the
    ///   price in the swap direction or lies past the outermost tick.
    /// - [`AmmError::InsufficientLiquidity`] if the price already sits on
    ///   the sentinel the swap moves toward.
    pub fn new(
        accounting: &'a mut LiquidityAccounting,
        sqrt_price: SqrtPrice,
        fee: BasisPoints,
        direction: SwapDirection,
        amount: Amount,
        limit: Option<SqrtPrice>,
    ) -> Result<Self> {
        if amount.is_zero() {
            return Err(AmmError::InsufficientInput {
                reason: "swap amount is zero",
                amount: 0,
            });
        }
        let (floor, ceiling) = accounting.ledger().bounds().sqrt_prices()?;
        let edge = if direction.is_zero_for_one() { floor } else { ceiling };
        match limit {
            Some(limit) if direction.is_zero_for_one() => {
                if limit >= sqrt_price || limit < floor {
                    return Err(AmmError::InvalidPrice(
                        "limit must lie below the price and within the tick bounds",
                    ));
                }
            }
            Some(limit) => {
                if limit <= sqrt_price || limit > ceiling {
                    return Err(AmmError::InvalidPrice(
                        "limit must lie above the price and within the tick bounds",
                    ));
                }
            }
            None if sqrt_price == edge => {
                return Err(AmmError::InsufficientLiquidity {
                    reason: "price sits on the tick domain boundary",
                    available: U256::zero(),
                });
            }
            None => {}
        }

        Ok(Self {
            accounting,
            direction,
            fee,
            sqrt_price,
            limit,
            requested: amount,
            remaining: amount.as_u256(),
            amount_out: U256::zero(),
            fee_total: U256::zero(),
            crossings: Vec::new(),
            state: StepState::Active,
        })
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> StepState {
        self.state
    }

    /// Current sqrt price.
    #[must_use]
    pub const fn sqrt_price(&self) -> SqrtPrice {
        self.sqrt_price
    }

    fn transition(&mut self, next: StepState) {
        trace!(
            from = ?self.state,
            to = ?next,
            sqrt_price = %self.sqrt_price.get(),
            remaining = %self.remaining,
            active_liquidity = self.accounting.active_liquidity().get(),
            "swap stepper transition"
        );
        self.state = next;
    }

    /// Next initialized tick in the swap direction.
    fn boundary(&self) -> Result<Tick> {
        let nearest = self.accounting.nearest_tick();
        if self.direction.is_zero_for_one() {
            Ok(nearest)
        } else {
            self.accounting.ledger().next(nearest)
        }
    }

    /// Advances by one transition. Does nothing once `Done`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`] when a segment starts with no
    ///   active liquidity or a sentinel is reached with input left.
    /// - Numeric errors from the swap segment math.
    pub fn step(&mut self) -> Result<()> {
        match self.state {
            StepState::Active => {
                let next = if self.remaining.is_zero() {
                    StepState::Done(SwapCompletion::Filled)
                } else if self.limit == Some(self.sqrt_price) {
                    StepState::Done(SwapCompletion::PriceLimitReached {
                        unfilled: Amount::from_u256(self.remaining)?,
                    })
                } else {
                    StepState::Stepping
                };
                self.transition(next);
            }
            StepState::Stepping => {
                let next = self.swap_segment()?;
                self.transition(next);
            }
            StepState::CrossingTick(tick) => {
                let crossing = self.accounting.cross(tick, self.direction)?;
                self.crossings.push(crossing);
                self.transition(StepState::Active);
            }
            StepState::Done(_) => {}
        }
        Ok(())
    }

    fn swap_segment(&mut self) -> Result<StepState> {
        let boundary = self.boundary()?;
        let boundary_price = SqrtPrice::from_tick(boundary)?;
        let sentinel = self.accounting.ledger().is_sentinel(boundary);
        if self.sqrt_price == boundary_price && !sentinel {
            // left uncrossed by an earlier downward swap
            return Ok(StepState::CrossingTick(boundary));
        }
        let liquidity = self.accounting.active_liquidity();
        if liquidity.is_zero() {
            return Err(AmmError::InsufficientLiquidity {
                reason: "no active liquidity with input left",
                available: U256::zero(),
            });
        }
        let target = match (self.limit, self.direction) {
            (Some(limit), SwapDirection::ZeroForOne) => boundary_price.max(limit),
            (Some(limit), SwapDirection::OneForZero) => boundary_price.min(limit),
            (None, _) => boundary_price,
        };

        let step = compute_swap_step(
            self.sqrt_price.get(),
            target.get(),
            liquidity.get(),
            self.remaining,
            self.fee,
        )?;
        let spent = step
            .amount_in
            .checked_add(step.fee_amount)
            .ok_or(AmmError::Overflow("swap step input"))?;
        self.remaining = self
            .remaining
            .checked_sub(spent)
            .ok_or(AmmError::Overflow("swap step spent more than remaining"))?;
        self.amount_out = self
            .amount_out
            .checked_add(step.amount_out)
            .ok_or(AmmError::Overflow("swap output total"))?;
        self.fee_total = self
            .fee_total
            .checked_add(step.fee_amount)
            .ok_or(AmmError::Overflow("swap fee total"))?;
        self.accounting.accrue_fee(self.direction, step.fee_amount)?;
        self.sqrt_price = SqrtPrice::new(step.sqrt_price_next)?;

        if !step.reached(boundary_price.get()) {
            return Ok(StepState::Active);
        }
        let settled = self.remaining.is_zero() || self.limit == Some(self.sqrt_price);
        if sentinel {
            if settled {
                return Ok(StepState::Active);
            }
            return Err(AmmError::InsufficientLiquidity {
                reason: "swap reached the tick domain boundary with input left",
                available: U256::from(liquidity.get()),
            });
        }
        if settled && self.direction.is_zero_for_one() {
            return Ok(StepState::Active);
        }
        Ok(StepState::CrossingTick(boundary))
    }

    /// Runs to `Done`.
    ///
    /// # Errors
    ///
    /// - Any [`step`](Self::step) error.
    /// - [`AmmError::InsufficientLiquidity`] if the swap produced no output.
    pub fn run(mut self) -> Result<StepOutcome> {
        let completion = loop {
            if let StepState::Done(completion) = self.state {
                break completion;
            }
            self.step()?;
        };
        if self.amount_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity {
                reason: "swap produces no output",
                available: U256::from(self.accounting.active_liquidity().get()),
            });
        }
        let remaining = Amount::from_u256(self.remaining)?;
        Ok(StepOutcome {
            sqrt_price: self.sqrt_price,
            tick: self.sqrt_price.tick()?,
            amount_in: self.requested.checked_sub(remaining, "swap input consumed")?,
            amount_out: Amount::from_u256(self.amount_out)?,
            fee: Amount::from_u256(self.fee_total)?,
            crossings: self.crossings,
            completion,
        })
    }
}
