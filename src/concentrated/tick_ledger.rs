//! Sparse ledger of initialized ticks.
//!
//! Records live in a map keyed by tick index; each record stores the index
//! of its neighbours, so the records form a doubly linked chain in
//! ascending order. The two ends of the configured [`TickBounds`] are
//! inserted at construction and can never be removed:
//!
//! ```text
//! MIN <-> t1 <-> t2 <-> ... <-> tn <-> MAX
//! ```
//!
//! `previous(MIN) == MIN` and `next(MAX) == MAX`.

use std::collections::HashMap;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::config::TickBounds;
use crate::domain::Tick;
use crate::error::{AmmError, Result};

/// State of one initialized tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Added to active liquidity when the price crosses upward, subtracted
    /// when it crosses downward.
    pub liquidity_net: i128,
    /// Total liquidity of positions bounded by this tick.
    pub liquidity_gross: u128,
    /// Next lower initialized tick.
    pub previous: Tick,
    /// Next higher initialized tick.
    pub next: Tick,
    /// Token0 fee growth on the side of the tick away from the price.
    pub fee_growth_outside0: U256,
    /// Token1 fee growth on the side of the tick away from the price.
    pub fee_growth_outside1: U256,
}

impl TickRecord {
    fn linked(previous: Tick, next: Tick) -> Self {
        Self {
            liquidity_net: 0,
            liquidity_gross: 0,
            previous,
            next,
            fee_growth_outside0: U256::zero(),
            fee_growth_outside1: U256::zero(),
        }
    }
}

/// Ordered chain of initialized ticks between two permanent sentinels.
///
/// # Examples
///
/// ```
/// use tick_amm::concentrated::TickLedger;
/// use tick_amm::config::TickBounds;
/// use tick_amm::domain::Tick;
///
/// let mut ledger = TickLedger::new(TickBounds::default());
/// let t = Tick::new(600).expect("in domain");
/// assert_eq!(ledger.insert(t, Some(Tick::MIN)), Ok(true));
/// assert_eq!(ledger.next(Tick::MIN), Ok(t));
/// assert_eq!(ledger.previous(Tick::MAX), Ok(t));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickLedger {
    records: HashMap<Tick, TickRecord>,
    bounds: TickBounds,
}

impl TickLedger {
    /// Creates a ledger holding only the two sentinels.
    #[must_use]
    pub fn new(bounds: TickBounds) -> Self {
        let (min, max) = (bounds.min(), bounds.max());
        let mut records = HashMap::new();
        records.insert(min, TickRecord::linked(min, max));
        records.insert(max, TickRecord::linked(min, max));
        Self { records, bounds }
    }

    /// Sentinel bounds.
    #[must_use]
    pub const fn bounds(&self) -> TickBounds {
        self.bounds
    }

    /// Returns `true` for a sentinel of this ledger.
    #[must_use]
    pub fn is_sentinel(&self, tick: Tick) -> bool {
        tick == self.bounds.min() || tick == self.bounds.max()
    }

    /// Returns `true` if `tick` is initialized.
    #[must_use]
    pub fn exists(&self, tick: Tick) -> bool {
        self.records.contains_key(&tick)
    }

    /// Record of an initialized tick.
    #[must_use]
    pub fn get(&self, tick: Tick) -> Option<&TickRecord> {
        self.records.get(&tick)
    }

    pub(crate) fn get_mut(&mut self, tick: Tick) -> Result<&mut TickRecord> {
        self.records.get_mut(&tick).ok_or(AmmError::InvalidTick {
            tick: tick.get(),
            reason: "tick is not initialized",
        })
    }

    fn record(&self, tick: Tick) -> Result<&TickRecord> {
        self.records.get(&tick).ok_or(AmmError::InvalidTick {
            tick: tick.get(),
            reason: "tick is not initialized",
        })
    }

    /// Number of initialized ticks, sentinels included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`: the sentinels are permanent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Next higher initialized tick.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTick`] if `tick` is not initialized.
    pub fn next(&self, tick: Tick) -> Result<Tick> {
        self.record(tick).map(|r| r.next)
    }

    /// Next lower initialized tick.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidTick`] if `tick` is not initialized.
    pub fn previous(&self, tick: Tick) -> Result<Tick> {
        self.record(tick).map(|r| r.previous)
    }

    /// Initializes `tick`, scanning upward from `hint`.
    ///
    /// Without a hint the scan starts at the lower sentinel. Returns
    /// `Ok(false)` without touching the chain if the tick already exists.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidTick`] if `tick` lies outside the bounds.
    /// - [`AmmError::InvalidHint`] if `hint` is not initialized or does not
    ///   lie below `tick`.
    pub fn insert(&mut self, tick: Tick, hint: Option<Tick>) -> Result<bool> {
        if !self.bounds.contains(tick) {
            return Err(AmmError::InvalidTick {
                tick: tick.get(),
                reason: "outside the configured tick bounds",
            });
        }
        if self.exists(tick) {
            return Ok(false);
        }
        let start = hint.unwrap_or(self.bounds.min());
        if start >= tick || !self.exists(start) {
            return Err(AmmError::InvalidHint {
                hint: start.get(),
                tick: tick.get(),
            });
        }

        let mut below = start;
        let mut above = self.next(below)?;
        while above < tick {
            below = above;
            above = self.next(below)?;
        }

        self.get_mut(below)?.next = tick;
        self.get_mut(above)?.previous = tick;
        self.records.insert(tick, TickRecord::linked(below, above));
        Ok(true)
    }

    /// Uninitializes `tick` and closes the gap.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::TickNotRemovable`] for a sentinel, an
    /// uninitialized tick, or a tick still referenced by a position.
    pub fn remove(&mut self, tick: Tick) -> Result<()> {
        if self.is_sentinel(tick) {
            return Err(AmmError::TickNotRemovable {
                tick: tick.get(),
                reason: "boundary ticks are permanent",
            });
        }
        let Some(record) = self.records.get(&tick).copied() else {
            return Err(AmmError::TickNotRemovable {
                tick: tick.get(),
                reason: "tick is not initialized",
            });
        };
        if record.liquidity_net != 0 || record.liquidity_gross != 0 {
            return Err(AmmError::TickNotRemovable {
                tick: tick.get(),
                reason: "tick still carries liquidity",
            });
        }
        self.get_mut(record.previous)?.next = record.next;
        self.get_mut(record.next)?.previous = record.previous;
        self.records.remove(&tick);
        Ok(())
    }

    /// Walks the chain from the lower sentinel upward.
    pub fn iter(&self) -> TickIter<'_> {
        TickIter {
            ledger: self,
            cursor: Some(self.bounds.min()),
        }
    }
}

/// Ascending walk over a [`TickLedger`].
#[derive(Debug)]
pub struct TickIter<'a> {
    ledger: &'a TickLedger,
    cursor: Option<Tick>,
}

impl<'a> Iterator for TickIter<'a> {
    type Item = (Tick, &'a TickRecord);

    fn next(&mut self) -> Option<Self::Item> {
        let tick = self.cursor?;
        let record = self.ledger.get(tick)?;
        self.cursor = (record.next != tick).then_some(record.next);
        Some((tick, record))
    }
}
