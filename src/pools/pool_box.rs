//! Enum dispatch over every pool type.
//!
//! [`PoolBox`] lets heterogeneous pools live in one collection. It
//! implements [`SwapPool`] by delegating through `match`; liquidity
//! operations take pool-specific deposits, so callers reach them through
//! [`PoolBox::as_curve_mut`] or [`PoolBox::as_concentrated_mut`].

use super::concentrated::ConcentratedPool;
use super::curve_pool::CurvePool;
use crate::domain::{
    Amount, BasisPoints, Liquidity, PoolCounters, Reserves, SwapDirection, SwapReceipt,
    SwapRequest, TokenPair,
};
use crate::error::Result;
use crate::traits::{LiquidityPool, SwapPool};

/// Any pool the factory can build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolBox {
    /// Constant-product, stable or weighted reserve pool.
    Curve(Box<CurvePool>),
    /// Tick-ranged concentrated-liquidity pool.
    Concentrated(Box<ConcentratedPool>),
}

/// Delegates a method call to the inner pool of every variant.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            PoolBox::Curve(p) => p.$method($($arg),*),
            PoolBox::Concentrated(p) => p.$method($($arg),*),
        }
    };
}

impl PoolBox {
    /// The reserve pool, if this is one.
    #[must_use]
    pub fn as_curve(&self) -> Option<&CurvePool> {
        match self {
            Self::Curve(pool) => Some(pool),
            Self::Concentrated(_) => None,
        }
    }

    /// Mutable access to the reserve pool.
    pub fn as_curve_mut(&mut self) -> Option<&mut CurvePool> {
        match self {
            Self::Curve(pool) => Some(pool),
            Self::Concentrated(_) => None,
        }
    }

    /// The concentrated pool, if this is one.
    #[must_use]
    pub fn as_concentrated(&self) -> Option<&ConcentratedPool> {
        match self {
            Self::Concentrated(pool) => Some(pool),
            Self::Curve(_) => None,
        }
    }

    /// Mutable access to the concentrated pool.
    pub fn as_concentrated_mut(&mut self) -> Option<&mut ConcentratedPool> {
        match self {
            Self::Concentrated(pool) => Some(pool),
            Self::Curve(_) => None,
        }
    }

    /// Shares or active liquidity of the inner pool.
    #[must_use]
    pub fn total_liquidity(&self) -> Liquidity {
        delegate!(self, total_liquidity())
    }
}

impl From<CurvePool> for PoolBox {
    fn from(pool: CurvePool) -> Self {
        Self::Curve(Box::new(pool))
    }
}

impl From<ConcentratedPool> for PoolBox {
    fn from(pool: ConcentratedPool) -> Self {
        Self::Concentrated(Box::new(pool))
    }
}

impl SwapPool for PoolBox {
    fn swap(&mut self, request: &SwapRequest) -> Result<SwapReceipt> {
        delegate!(self, swap(request))
    }

    fn quote_amount_out(&self, direction: SwapDirection, amount_in: Amount) -> Result<Amount> {
        delegate!(self, quote_amount_out(direction, amount_in))
    }

    fn token_pair(&self) -> &TokenPair {
        delegate!(self, token_pair())
    }

    fn fee(&self) -> BasisPoints {
        delegate!(self, fee())
    }

    fn reserves(&self) -> Reserves {
        delegate!(self, reserves())
    }

    fn counters(&self) -> &PoolCounters {
        delegate!(self, counters())
    }
}
