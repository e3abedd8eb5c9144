//! Chain-agnostic account and token identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A 32-byte identity naming either a token or a liquidity provider.
///
/// The engine never moves tokens; addresses only key positions and tell the
/// caller whom a receipt settles against.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::Address;
///
/// let alice = Address::from_bytes([7u8; 32]);
/// assert_eq!(alice.as_bytes(), [7u8; 32]);
/// assert!(Address::zero() < alice);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 32]);

impl Address {
    /// Wraps raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// The all-zero address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_bytewise() {
        let lo = Address::from_bytes([1u8; 32]);
        let hi = Address::from_bytes([2u8; 32]);
        assert!(lo < hi);
        assert_ne!(lo, hi);
    }

    #[test]
    fn display_is_abbreviated() {
        let addr = Address::from_bytes([0xab; 32]);
        assert_eq!(addr.to_string(), "0xabababab…");
    }
}
