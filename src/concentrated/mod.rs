//! Concentrated-liquidity engine.
//!
//! [`TickLedger`] keeps the linked chain of initialized ticks,
//! [`LiquidityAccounting`] tracks positions, active liquidity and fee
//! growth on top of it, and [`SwapStepper`] walks a swap across the chain.
//! [`ConcentratedPool`](crate::pools::ConcentratedPool) ties them to
//! reserves and the pool price.

pub mod positions;
pub mod swap_stepper;
pub mod tick_ledger;

pub use positions::{LiquidityAccounting, Position, PositionKey};
pub use swap_stepper::{StepOutcome, StepState, SwapStepper};
pub use tick_ledger::{TickIter, TickLedger, TickRecord};
