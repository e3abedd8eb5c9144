//! # Tick AMM
//!
//! Deterministic pricing engine for automated market makers: an
//! overflow-exact numeric kernel, three reserve curves, and a tick-ranged
//! concentrated-liquidity engine, all behind one pool interface.
//!
//! - **Constant product** `x * y = k`
//! - **Stable** amplified-sum invariant, solved by capped Newton iteration
//! - **Weighted** `x^w0 * y^w1 = k` over Q1.127 logarithms
//! - **Concentrated liquidity** with per-range positions, fee growth, and a
//!   swap state machine that crosses initialized ticks
//!
//! The engine never moves tokens. Every operation returns a receipt the
//! caller settles against its own custody layer, for example a
//! [`BalanceVault`](traits::BalanceVault).
//!
//! # Quick Start
//!
//! ```rust
//! use tick_amm::prelude::*;
//!
//! let engine = EngineConfig::default();
//! let d = Decimals::new(18)?;
//! let pair = TokenPair::new(
//!     Token::new(Address::from_bytes([1; 32]), d),
//!     Token::new(Address::from_bytes([2; 32]), d),
//! )?;
//! let config = ConcentratedConfig::new(pair, FeeTier::MEDIUM, SqrtPrice::unit(), &engine)?;
//! let mut pool = ConcentratedPool::from_config(&config, &engine)?;
//!
//! let alice = Address::from_bytes([7; 32]);
//! let range = TickRange::from_indices(-600, 600)?;
//! pool.mint(
//!     &RangeDeposit::liquidity(range, Liquidity::new(1_000_000_000)),
//!     Liquidity::ZERO,
//!     alice,
//! )?;
//! assert_eq!(pool.active_liquidity(), Liquidity::new(1_000_000_000));
//!
//! let receipt = pool.swap(&SwapRequest::new(Amount::new(10_000), SwapDirection::ZeroForOne, alice))?;
//! assert!(receipt.amount_out.get() > 0);
//! assert!(pool.current_tick() < Tick::ZERO);
//! # Ok::<(), tick_amm::error::AmmError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer   │  PoolConfig + EngineConfig
//! └──────┬───────┘
//!        │ DefaultPoolFactory::create
//!        ▼
//! ┌──────────────┐
//! │    Pools     │  CurvePool, ConcentratedPool, PoolBox
//! └──────┬───────┘
//!        │ SwapPool + LiquidityPool
//!        ▼
//! ┌──────────────┐   ┌──────────────────────────────────────┐
//! │    Curves    │   │ Concentrated: TickLedger, positions,  │
//! │  CP / Stable │   │ SwapStepper                           │
//! │   Weighted   │   └──────────────────────────────────────┘
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │     Math     │  mul_div, sqrt, ln/exp, tick math
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Tick`](domain::Tick), [`SqrtPrice`](domain::SqrtPrice), receipts |
//! | [`math`] | Numeric kernel |
//! | [`curves`] | [`CurveStrategy`](curves::CurveStrategy) and the three reserve invariants |
//! | [`concentrated`] | Tick ledger, position accounting, swap stepper |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`FromConfig`](traits::FromConfig), [`BalanceVault`](traits::BalanceVault) |
//! | [`config`] | [`EngineConfig`](config::EngineConfig) and per-pool blueprints |
//! | [`pools`] | Pool implementations and the [`PoolBox`](pools::PoolBox) dispatch enum |
//! | [`factory`] | [`DefaultPoolFactory`](factory::DefaultPoolFactory) |
//! | [`error`] | [`AmmError`](error::AmmError) |
//! | [`prelude`] | Common re-exports |

pub mod concentrated;
pub mod config;
pub mod curves;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
