//! Pool seams.
//!
//! [`SwapPool`] for swaps and queries, [`LiquidityPool`] for minting and
//! burning, [`FromConfig`] for configuration-driven construction, and
//! [`BalanceVault`] for the external custody layer receipts are settled
//! against.

mod balance_vault;
mod from_config;
mod liquidity_pool;
mod swap_pool;

pub use balance_vault::BalanceVault;
pub use from_config::FromConfig;
pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
