//! Rounding direction for integer division.

use serde::{Deserialize, Serialize};

/// Direction in which a lossy division settles.
///
/// Every division in the engine names its direction. Amounts owed to the
/// pool round [`Up`](Self::Up); amounts paid out round
/// [`Down`](Self::Down).
///
/// # Examples
///
/// ```
/// use tick_amm::domain::Rounding;
/// use tick_amm::math::mul_div_u128;
///
/// assert_eq!(mul_div_u128(7, 1, 2, Rounding::Up), Ok(4));
/// assert_eq!(mul_div_u128(7, 1, 2, Rounding::Down), Ok(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Towards positive infinity.
    Up,
    /// Towards zero.
    Down,
}
