//! Unified error types for the tick-amm engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type. Every variant carries enough structured detail (what kind of
//! failure, and the offending value or bound) for a caller to tell a
//! malformed request apart from a numeric or solver limit.
//!
//! No operation retries internally and no operation leaves partial state
//! behind: an `Err` always means the pool is exactly as it was before the
//! call.

use primitive_types::U256;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every failure the engine can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    // -- numeric kernel limits ---------------------------------------------
    /// An intermediate or final value exceeded its representable width.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Narrowing a value would have lost information.
    #[error("cast overflow: {value} does not fit in {target}")]
    CastOverflow {
        /// Name of the target type.
        target: &'static str,
        /// Decimal rendering of the value that failed to narrow.
        value: String,
    },

    /// A logarithm, exponential, or power was evaluated outside its domain.
    #[error("{function} is undefined for argument {argument}")]
    InvalidDomain {
        /// The kernel function that rejected the argument.
        function: &'static str,
        /// The rejected fixed-point argument.
        argument: U256,
    },

    /// An iterative solver exhausted its iteration cap.
    #[error("{solver} did not converge within {iterations} iterations")]
    ConvergenceFailure {
        /// Which solver failed (`invariant` or `balance`).
        solver: &'static str,
        /// The cap that was reached.
        iterations: u32,
    },

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    // -- caller preconditions ----------------------------------------------
    /// The pool cannot satisfy the request with its current liquidity.
    #[error("insufficient liquidity: {reason} (available {available})")]
    InsufficientLiquidity {
        /// What ran short.
        reason: &'static str,
        /// The reserve, balance or liquidity that was available.
        available: U256,
    },

    /// The supplied input amount is zero or too small to have any effect.
    #[error("insufficient input: {reason} (amount {amount})")]
    InsufficientInput {
        /// Why the input was refused.
        reason: &'static str,
        /// The offending amount.
        amount: u128,
    },

    /// A provider tried to burn more than they own.
    #[error("insufficient liquidity owned: requested {requested}, owned {owned}")]
    InsufficientLiquidityOwned {
        /// Liquidity or shares requested for burning.
        requested: u128,
        /// Liquidity or shares actually owned.
        owned: u128,
    },

    /// The output fell below the caller's minimum.
    #[error("slippage exceeded: minimum {minimum}, actual {actual}")]
    SlippageExceeded {
        /// The caller's minimum.
        minimum: u128,
        /// What the operation would have produced.
        actual: u128,
    },

    /// The sqrt-price limit stopped the swap before the input was consumed.
    ///
    /// Carries the partially filled amounts.
    #[error("price limit reached after consuming {amount_in} for {amount_out}")]
    PriceLimitReached {
        /// Input consumed before the limit was hit.
        amount_in: u128,
        /// Output produced before the limit was hit.
        amount_out: u128,
    },

    // -- malformed arguments -----------------------------------------------
    /// A tick range with `lower >= upper` or outside the domain bounds.
    #[error("invalid range [{lower}, {upper})")]
    InvalidRange {
        /// Lower tick of the rejected range.
        lower: i32,
        /// Upper tick of the rejected range.
        upper: i32,
    },

    /// An insertion hint that does not exist or does not precede its target.
    #[error("invalid hint {hint} for tick {tick}")]
    InvalidHint {
        /// The supplied hint.
        hint: i32,
        /// The tick being inserted.
        tick: i32,
    },

    /// A weighted curve's weight pair does not sum to the expected total.
    #[error("invalid weights {weight0}/{weight1}: must be positive and sum to {expected_total}")]
    InvalidWeights {
        /// Weight of token 0.
        weight0: u32,
        /// Weight of token 1.
        weight1: u32,
        /// Required sum of both weights.
        expected_total: u32,
    },

    /// A fee rate above the configured ceiling.
    #[error("invalid swap fee {fee} bps: maximum is {max} bps")]
    InvalidSwapFee {
        /// The rejected fee in basis points.
        fee: u32,
        /// The configured ceiling in basis points.
        max: u32,
    },

    /// A tick index outside the domain or off the pool's spacing grid.
    #[error("invalid tick {tick}: {reason}")]
    InvalidTick {
        /// The rejected tick index.
        tick: i32,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A tick that still carries liquidity or is a domain boundary.
    #[error("tick {tick} cannot be removed: {reason}")]
    TickNotRemovable {
        /// The tick that was targeted.
        tick: i32,
        /// Why removal was refused.
        reason: &'static str,
    },

    /// A sqrt price or price limit outside the representable domain.
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),

    /// A token not part of the pool pair, or a malformed pair.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// Decimals outside the supported range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// Inconsistent configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// No position exists for the given owner and range.
    #[error("position not found")]
    PositionNotFound,
}

impl AmmError {
    /// Returns `true` when the failure comes from a numeric or solver limit
    /// rather than from a malformed request.
    #[must_use]
    pub const fn is_system_limit(&self) -> bool {
        matches!(
            self,
            Self::Overflow(_)
                | Self::CastOverflow { .. }
                | Self::InvalidDomain { .. }
                | Self::ConvergenceFailure { .. }
                | Self::DivisionByZero
        )
    }

    /// Returns `true` for the partial-fill outcome.
    #[must_use]
    pub const fn is_partial_fill(&self) -> bool {
        matches!(self, Self::PriceLimitReached { .. })
    }

    /// Returns `true` when the caller can fix the failure by changing
    /// arguments.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        !self.is_system_limit() && !self.is_partial_fill()
    }
}
