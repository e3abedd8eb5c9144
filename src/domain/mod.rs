//! Validated value types shared by every pool.
//!
//! Newtypes check their invariants at construction (and on
//! deserialization), so code holding a [`Tick`], [`SqrtPrice`], or
//! [`TickRange`] never re-validates it.

mod address;
mod amount;
mod basis_points;
mod counters;
mod decimals;
mod fee_tier;
mod liquidity;
mod range;
mod receipts;
mod reserves;
mod rounding;
mod sqrt_price;
mod swap;
mod tick;
mod token;
mod token_pair;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use counters::PoolCounters;
pub use decimals::Decimals;
pub use fee_tier::FeeTier;
pub use liquidity::Liquidity;
pub use range::TickRange;
pub use receipts::{BurnReceipt, FeeCollection, MintReceipt, SwapCompletion, SwapReceipt, TickCrossing};
pub use reserves::Reserves;
pub use rounding::Rounding;
pub use sqrt_price::SqrtPrice;
pub use swap::{SwapDirection, SwapLimit, SwapRequest};
pub use tick::Tick;
pub use token::Token;
pub use token_pair::TokenPair;
