//! Checked narrowing between the integer widths the engine uses.

use primitive_types::U256;

use crate::error::{AmmError, Result};

/// Narrowing conversion that fails with [`AmmError::CastOverflow`] instead
/// of truncating.
pub trait SafeCast<T> {
    /// Converts `self` into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::CastOverflow`] if the value is not representable
    /// in `T`.
    fn safe_cast(self) -> Result<T>;
}

impl SafeCast<u128> for U256 {
    fn safe_cast(self) -> Result<u128> {
        if self.bits() > 128 {
            return Err(AmmError::CastOverflow {
                target: "u128",
                value: self.to_string(),
            });
        }
        Ok(self.low_u128())
    }
}

/// Implements `SafeCast` for primitive pairs through `TryFrom`.
macro_rules! impl_primitive_cast {
    ($($from:ty => $to:ty),* $(,)?) => {
        $(
            impl SafeCast<$to> for $from {
                fn safe_cast(self) -> Result<$to> {
                    <$to>::try_from(self).map_err(|_| AmmError::CastOverflow {
                        target: stringify!($to),
                        value: self.to_string(),
                    })
                }
            }
        )*
    };
}

impl_primitive_cast!(
    u128 => i128,
    i128 => u128,
);
