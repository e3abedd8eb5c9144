//! Token identity.

use serde::{Deserialize, Serialize};

use super::{Address, Decimals};

/// A token: its address and the decimal places its raw amounts use.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::{Address, Decimals, Token};
///
/// let usdc = Token::new(Address::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
/// assert_eq!(usdc.decimals().get(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    address: Address,
    decimals: Decimals,
}

impl Token {
    /// Creates a token from validated parts.
    #[must_use]
    pub const fn new(address: Address, decimals: Decimals) -> Self {
        Self { address, decimals }
    }

    /// Token address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Decimal places.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }
}
