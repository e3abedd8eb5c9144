//! Pool implementations and the [`PoolBox`] dispatch enum.
//!
//! | Pool | Pricing |
//! |------|---------|
//! | [`CurvePool`] | one reserve curve: constant product, stable or weighted |
//! | [`ConcentratedPool`] | tick-ranged liquidity walked by the swap stepper |

pub mod concentrated;
pub mod curve_pool;

mod pool_box;

#[cfg(test)]
mod proptest_properties;

pub use concentrated::{ConcentratedPool, RangeDeposit, RangeFunding, RangeWithdrawal};
pub use curve_pool::{CurvePool, ShareDeposit, ShareWithdrawal};
pub use pool_box::PoolBox;
