//! Liquidity accounting for concentrated positions.
//!
//! Active liquidity is tracked with a cursor: `nearest_tick` is the greatest
//! initialized tick at or below the current tick. The invariant is
//!
//! ```text
//! active_liquidity == sum of liquidity_net over initialized ticks <= nearest_tick
//! ```
//!
//! so a range `[lower, upper)` is active exactly when
//! `lower <= nearest_tick < upper`. A price resting on an initialized tick
//! keeps that tick as the cursor, whichever side it arrived from.
//!
//! Fee growth follows the usual "outside" bookkeeping: each tick stores the
//! growth on the side away from the price, globals accumulate
//! `fee * 2^128 / active_liquidity`, and all growth values wrap modulo
//! `2^256`.

use std::collections::BTreeMap;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::tick_ledger::TickLedger;
use crate::config::TickBounds;
use crate::domain::{Address, Amount, Liquidity, SwapDirection, Tick, TickCrossing, TickRange};
use crate::error::{AmmError, Result};
use crate::math::{mul_div, SafeCast};

fn q128() -> U256 {
    U256::one() << 128u32
}

fn wrapping_sub(a: U256, b: U256) -> U256 {
    a.overflowing_sub(b).0
}

fn wrapping_add(a: U256, b: U256) -> U256 {
    a.overflowing_add(b).0
}

fn signed(liquidity: Liquidity) -> Result<i128> {
    liquidity.get().safe_cast()
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Identifies a position: one owner, one range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PositionKey {
    /// Provider.
    pub owner: Address,
    /// Price range.
    pub range: TickRange,
}

/// Liquidity and uncollected fees of one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    liquidity: Liquidity,
    fee_growth_inside0_last: U256,
    fee_growth_inside1_last: U256,
    tokens_owed0: Amount,
    tokens_owed1: Amount,
}

impl Position {
    fn opened(inside: (U256, U256)) -> Self {
        Self {
            liquidity: Liquidity::ZERO,
            fee_growth_inside0_last: inside.0,
            fee_growth_inside1_last: inside.1,
            tokens_owed0: Amount::ZERO,
            tokens_owed1: Amount::ZERO,
        }
    }

    /// Liquidity currently provided.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Fees credited but not yet collected, as of the last update.
    #[must_use]
    pub const fn tokens_owed(&self) -> (Amount, Amount) {
        (self.tokens_owed0, self.tokens_owed1)
    }

    /// Inside fee growth at the last update.
    #[must_use]
    pub const fn fee_growth_inside_last(&self) -> (U256, U256) {
        (self.fee_growth_inside0_last, self.fee_growth_inside1_last)
    }

    fn is_closed(&self) -> bool {
        self.liquidity.is_zero() && self.tokens_owed0.is_zero() && self.tokens_owed1.is_zero()
    }

    /// Credits fees earned since the last update.
    fn accrue(&mut self, inside: (U256, U256)) -> Result<()> {
        let liquidity = U256::from(self.liquidity.get());
        let earned0 = mul_div(
            wrapping_sub(inside.0, self.fee_growth_inside0_last),
            liquidity,
            q128(),
        )?;
        let earned1 = mul_div(
            wrapping_sub(inside.1, self.fee_growth_inside1_last),
            liquidity,
            q128(),
        )?;
        self.tokens_owed0 = self
            .tokens_owed0
            .checked_add(Amount::from_u256(earned0)?, "token0 fees owed")?;
        self.tokens_owed1 = self
            .tokens_owed1
            .checked_add(Amount::from_u256(earned1)?, "token1 fees owed")?;
        self.fee_growth_inside0_last = inside.0;
        self.fee_growth_inside1_last = inside.1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LiquidityAccounting
// ---------------------------------------------------------------------------

/// Ticks, positions, active liquidity and fee growth of one concentrated
/// pool.
///
/// Mutating methods may leave partial updates behind on error; callers run
/// them on a draft copy and commit only on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityAccounting {
    ledger: TickLedger,
    positions: BTreeMap<PositionKey, Position>,
    active_liquidity: Liquidity,
    nearest_tick: Tick,
    fee_growth_global0: U256,
    fee_growth_global1: U256,
}

impl LiquidityAccounting {
    /// Empty accounting over `bounds`.
    #[must_use]
    pub fn new(bounds: TickBounds) -> Self {
        Self {
            ledger: TickLedger::new(bounds),
            positions: BTreeMap::new(),
            active_liquidity: Liquidity::ZERO,
            nearest_tick: bounds.min(),
            fee_growth_global0: U256::zero(),
            fee_growth_global1: U256::zero(),
        }
    }

    /// The tick chain.
    #[must_use]
    pub const fn ledger(&self) -> &TickLedger {
        &self.ledger
    }

    /// Liquidity in range at the current price.
    #[must_use]
    pub const fn active_liquidity(&self) -> Liquidity {
        self.active_liquidity
    }

    /// Greatest initialized tick at or below the current tick.
    #[must_use]
    pub const fn nearest_tick(&self) -> Tick {
        self.nearest_tick
    }

    /// Global fee growth per unit of liquidity, Q128.
    #[must_use]
    pub const fn fee_growth_global(&self) -> (U256, U256) {
        (self.fee_growth_global0, self.fee_growth_global1)
    }

    /// Position of `owner` over `range`.
    #[must_use]
    pub fn position(&self, owner: &Address, range: TickRange) -> Option<&Position> {
        self.positions.get(&PositionKey {
            owner: *owner,
            range,
        })
    }

    /// All open positions in key order.
    pub fn positions(&self) -> impl Iterator<Item = (&PositionKey, &Position)> {
        self.positions.iter()
    }

    /// Returns `true` if liquidity over `range` is counted as active.
    #[must_use]
    pub fn is_active(&self, range: TickRange) -> bool {
        range.lower() <= self.nearest_tick && self.nearest_tick < range.upper()
    }

    fn crossed(&self, tick: Tick) -> bool {
        tick <= self.nearest_tick
    }

    /// Fee growth accumulated inside `range`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTick`] if a bound is not initialized.
    pub fn fee_growth_inside(&self, range: TickRange) -> Result<(U256, U256)> {
        let (lower, upper) = (range.lower(), range.upper());
        let (Some(lower_record), Some(upper_record)) = (self.ledger.get(lower), self.ledger.get(upper))
        else {
            return Err(AmmError::InvalidTick {
                tick: lower.get(),
                reason: "range bound is not initialized",
            });
        };
        let global = (self.fee_growth_global0, self.fee_growth_global1);

        let below = if self.crossed(lower) {
            (lower_record.fee_growth_outside0, lower_record.fee_growth_outside1)
        } else {
            (
                wrapping_sub(global.0, lower_record.fee_growth_outside0),
                wrapping_sub(global.1, lower_record.fee_growth_outside1),
            )
        };
        let above = if self.crossed(upper) {
            (
                wrapping_sub(global.0, upper_record.fee_growth_outside0),
                wrapping_sub(global.1, upper_record.fee_growth_outside1),
            )
        } else {
            (upper_record.fee_growth_outside0, upper_record.fee_growth_outside1)
        };

        Ok((
            wrapping_sub(wrapping_sub(global.0, below.0), above.0),
            wrapping_sub(wrapping_sub(global.1, below.1), above.1),
        ))
    }

    /// Initializes `tick` if needed, advancing the cursor over new ticks the
    /// price already sits above.
    fn initialize(&mut self, tick: Tick, hint: Tick, current_tick: Tick) -> Result<()> {
        if !self.ledger.insert(tick, Some(hint))? {
            return Ok(());
        }
        if self.nearest_tick < tick && tick <= current_tick {
            self.nearest_tick = tick;
        }
        let crossed = self.crossed(tick);
        let global = (self.fee_growth_global0, self.fee_growth_global1);
        let record = self.ledger.get_mut(tick)?;
        if crossed {
            record.fee_growth_outside0 = global.0;
            record.fee_growth_outside1 = global.1;
        }
        Ok(())
    }

    fn update_tick(&mut self, tick: Tick, net: i128, gross: i128) -> Result<()> {
        let record = self.ledger.get_mut(tick)?;
        record.liquidity_net = record
            .liquidity_net
            .checked_add(net)
            .ok_or(AmmError::Overflow("tick net liquidity"))?;
        record.liquidity_gross = Liquidity::new(record.liquidity_gross)
            .apply_delta(gross)?
            .get();
        Ok(())
    }

    /// Drops `tick` from the chain once nothing references it.
    fn release(&mut self, tick: Tick) -> Result<()> {
        if self.ledger.is_sentinel(tick) {
            return Ok(());
        }
        let record = self.ledger.get_mut(tick)?;
        if record.liquidity_gross != 0 {
            return Ok(());
        }
        if tick == self.nearest_tick {
            self.nearest_tick = record.previous;
        }
        self.ledger.remove(tick)
    }

    fn default_hint(&self, tick: Tick) -> Tick {
        if self.nearest_tick < tick {
            self.nearest_tick
        } else {
            self.ledger.bounds().min()
        }
    }

    /// Adds `liquidity` to `owner`'s position over `range`.
    ///
    /// `lower_hint` seeds the lower tick's insertion scan; the upper tick
    /// is searched from the lower one. Without a hint the cursor is used
    /// when it lies below the lower tick.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInput`] for zero liquidity.
    /// - [`AmmError::InvalidHint`] for a bad hint.
    /// - [`AmmError::Overflow`] if a liquidity total overflows.
    pub fn add(
        &mut self,
        owner: Address,
        range: TickRange,
        liquidity: Liquidity,
        lower_hint: Option<Tick>,
        current_tick: Tick,
    ) -> Result<()> {
        if liquidity.is_zero() {
            return Err(AmmError::InsufficientInput {
                reason: "liquidity amount is zero",
                amount: 0,
            });
        }
        let delta = signed(liquidity)?;
        let (lower, upper) = (range.lower(), range.upper());

        let hint = lower_hint.unwrap_or_else(|| self.default_hint(lower));
        self.initialize(lower, hint, current_tick)?;
        self.initialize(upper, lower, current_tick)?;
        self.update_tick(lower, delta, delta)?;
        self.update_tick(upper, -delta, delta)?;

        let inside = self.fee_growth_inside(range)?;
        let position = self
            .positions
            .entry(PositionKey { owner, range })
            .or_insert_with(|| Position::opened(inside));
        position.accrue(inside)?;
        position.liquidity = position
            .liquidity
            .checked_add(liquidity)
            .ok_or(AmmError::Overflow("position liquidity"))?;

        if self.is_active(range) {
            self.active_liquidity = self
                .active_liquidity
                .checked_add(liquidity)
                .ok_or(AmmError::Overflow("active liquidity"))?;
        }
        Ok(())
    }

    /// Removes `liquidity` from `owner`'s position over `range`, crediting
    /// fees earned so far. Ticks left unreferenced are uninitialized.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientInput`] for zero liquidity.
    /// - [`AmmError::PositionNotFound`] if the position does not exist.
    /// - [`AmmError::InsufficientLiquidityOwned`] if it holds less.
    pub fn remove(&mut self, owner: Address, range: TickRange, liquidity: Liquidity) -> Result<()> {
        if liquidity.is_zero() {
            return Err(AmmError::InsufficientInput {
                reason: "liquidity amount is zero",
                amount: 0,
            });
        }
        let delta = signed(liquidity)?;
        let key = PositionKey { owner, range };
        let inside = self.fee_growth_inside(range);
        let Some(position) = self.positions.get_mut(&key) else {
            return Err(AmmError::PositionNotFound);
        };
        let owned = position.liquidity;
        let Some(left) = owned.checked_sub(liquidity) else {
            return Err(AmmError::InsufficientLiquidityOwned {
                requested: liquidity.get(),
                owned: owned.get(),
            });
        };
        position.accrue(inside?)?;
        position.liquidity = left;
        if position.is_closed() {
            self.positions.remove(&key);
        }

        if self.is_active(range) {
            self.active_liquidity = self
                .active_liquidity
                .checked_sub(liquidity)
                .ok_or(AmmError::InsufficientLiquidity {
                    reason: "active liquidity below zero",
                    available: U256::from(self.active_liquidity.get()),
                })?;
        }
        self.update_tick(range.lower(), -delta, -delta)?;
        self.update_tick(range.upper(), delta, -delta)?;
        self.release(range.upper())?;
        self.release(range.lower())
    }

    /// Credits earned fees and hands out everything owed to the position.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PositionNotFound`] if the position does not
    /// exist.
    pub fn collect(&mut self, owner: Address, range: TickRange) -> Result<(Amount, Amount)> {
        let key = PositionKey { owner, range };
        if !self.positions.contains_key(&key) {
            return Err(AmmError::PositionNotFound);
        }
        let inside = if self.ledger.exists(range.lower()) && self.ledger.exists(range.upper()) {
            Some(self.fee_growth_inside(range)?)
        } else {
            None
        };
        let Some(position) = self.positions.get_mut(&key) else {
            return Err(AmmError::PositionNotFound);
        };
        if let Some(inside) = inside {
            position.accrue(inside)?;
        }
        let owed = position.tokens_owed();
        position.tokens_owed0 = Amount::ZERO;
        position.tokens_owed1 = Amount::ZERO;
        if position.is_closed() {
            self.positions.remove(&key);
        }
        Ok(owed)
    }

    /// Adds a swap step's fee to the global growth of the input token.
    ///
    /// # Errors
    ///
    /// Propagates [`mul_div`] overflow.
    pub fn accrue_fee(&mut self, direction: SwapDirection, fee: U256) -> Result<()> {
        if fee.is_zero() || self.active_liquidity.is_zero() {
            return Ok(());
        }
        let growth = mul_div(fee, q128(), U256::from(self.active_liquidity.get()))?;
        match direction {
            SwapDirection::ZeroForOne => {
                self.fee_growth_global0 = wrapping_add(self.fee_growth_global0, growth);
            }
            SwapDirection::OneForZero => {
                self.fee_growth_global1 = wrapping_add(self.fee_growth_global1, growth);
            }
        }
        Ok(())
    }

    /// Moves the price across `tick`.
    ///
    /// Downward crossings subtract the tick's net liquidity and move the
    /// cursor to its predecessor; upward crossings add it and move the
    /// cursor onto the tick.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidTick`] if `tick` is not initialized or is a
    ///   sentinel.
    /// - [`AmmError::InsufficientLiquidity`] /
    ///   [`AmmError::Overflow`] if active liquidity leaves `u128`.
    pub fn cross(&mut self, tick: Tick, direction: SwapDirection) -> Result<TickCrossing> {
        if self.ledger.is_sentinel(tick) {
            return Err(AmmError::InvalidTick {
                tick: tick.get(),
                reason: "boundary ticks cannot be crossed",
            });
        }
        let global = (self.fee_growth_global0, self.fee_growth_global1);
        let record = self.ledger.get_mut(tick)?;
        record.fee_growth_outside0 = wrapping_sub(global.0, record.fee_growth_outside0);
        record.fee_growth_outside1 = wrapping_sub(global.1, record.fee_growth_outside1);
        let (net, previous) = (record.liquidity_net, record.previous);

        match direction {
            SwapDirection::ZeroForOne => {
                self.active_liquidity = self.active_liquidity.apply_delta(-net)?;
                self.nearest_tick = previous;
            }
            SwapDirection::OneForZero => {
                self.active_liquidity = self.active_liquidity.apply_delta(net)?;
                self.nearest_tick = tick;
            }
        }
        Ok(TickCrossing {
            tick,
            liquidity_net: net,
            active_liquidity: self.active_liquidity,
        })
    }
}
