//! Canonically ordered token pair.

use serde::{Deserialize, Serialize};

use super::{Address, SwapDirection, Token};
use crate::error::{AmmError, Result};

/// Two distinct tokens sorted by address.
///
/// `token0` always has the lower address; prices are quoted as token1 per
/// token0, and [`SwapDirection::ZeroForOne`] sells token0.
///
/// # Examples
///
/// ```
/// use tick_amm::domain::{Address, Decimals, SwapDirection, Token, TokenPair};
///
/// let a = Token::new(Address::from_bytes([1u8; 32]), Decimals::new(6).expect("valid"));
/// let b = Token::new(Address::from_bytes([2u8; 32]), Decimals::new(18).expect("valid"));
///
/// let pair = TokenPair::new(b, a).expect("distinct");
/// assert_eq!(pair.token0(), a);
/// assert_eq!(pair.direction_for(&b.address()), Ok(SwapDirection::OneForZero));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[Token; 2]", into = "[Token; 2]")]
pub struct TokenPair {
    token0: Token,
    token1: Token,
}

impl TokenPair {
    /// Sorts and validates two tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both share an address.
    pub fn new(a: Token, b: Token) -> Result<Self> {
        if a.address() == b.address() {
            return Err(AmmError::InvalidToken(
                "token pair requires two distinct addresses",
            ));
        }
        let (token0, token1) = if a.address() < b.address() {
            (a, b)
        } else {
            (b, a)
        };
        Ok(Self { token0, token1 })
    }

    /// Lower-address token.
    #[must_use]
    pub const fn token0(&self) -> Token {
        self.token0
    }

    /// Higher-address token.
    #[must_use]
    pub const fn token1(&self) -> Token {
        self.token1
    }

    /// Returns `true` if `address` names either token.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.token0.address() == *address || self.token1.address() == *address
    }

    /// Direction of a swap that sells the token at `token_in`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    pub fn direction_for(&self, token_in: &Address) -> Result<SwapDirection> {
        if *token_in == self.token0.address() {
            Ok(SwapDirection::ZeroForOne)
        } else if *token_in == self.token1.address() {
            Ok(SwapDirection::OneForZero)
        } else {
            Err(AmmError::InvalidToken("token is not part of this pair"))
        }
    }

    /// `(token_in, token_out)` for a swap direction.
    #[must_use]
    pub const fn tokens_for(&self, direction: SwapDirection) -> (Token, Token) {
        match direction {
            SwapDirection::ZeroForOne => (self.token0, self.token1),
            SwapDirection::OneForZero => (self.token1, self.token0),
        }
    }
}

impl TryFrom<[Token; 2]> for TokenPair {
    type Error = AmmError;

    fn try_from([a, b]: [Token; 2]) -> Result<Self> {
        Self::new(a, b)
    }
}

impl From<TokenPair> for [Token; 2] {
    fn from(pair: TokenPair) -> Self {
        [pair.token0, pair.token1]
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Decimals;

    fn token(byte: u8, decimals: u8) -> Token {
        let Ok(d) = Decimals::new(decimals) else {
            panic!("expected Ok");
        };
        Token::new(Address::from_bytes([byte; 32]), d)
    }

    #[test]
    fn sorts_by_address() {
        let Ok(pair) = TokenPair::new(token(9, 18), token(3, 6)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.token0(), token(3, 6));
        assert_eq!(pair.token1(), token(9, 18));
    }

    #[test]
    fn same_address_rejected_even_with_other_decimals() {
        assert!(matches!(
            TokenPair::new(token(1, 6), token(1, 18)),
            Err(AmmError::InvalidToken(_))
        ));
    }

    #[test]
    fn directions() {
        let Ok(pair) = TokenPair::new(token(1, 18), token(2, 18)) else {
            panic!("expected Ok");
        };
        assert_eq!(
            pair.direction_for(&token(1, 18).address()),
            Ok(SwapDirection::ZeroForOne)
        );
        assert!(pair.direction_for(&Address::zero()).is_err());
        let (token_in, token_out) = pair.tokens_for(SwapDirection::OneForZero);
        assert_eq!(token_in, pair.token1());
        assert_eq!(token_out, pair.token0());
    }

    #[test]
    fn deserialization_sorts_and_validates() {
        let Ok(pair) = TokenPair::new(token(1, 18), token(2, 6)) else {
            panic!("expected Ok");
        };
        let Ok(json) = serde_json::to_string(&[token(2, 6), token(1, 18)]) else {
            panic!("expected Ok");
        };
        assert_eq!(serde_json::from_str::<TokenPair>(&json).ok(), Some(pair));

        let Ok(dup) = serde_json::to_string(&[token(4, 6), token(4, 6)]) else {
            panic!("expected Ok");
        };
        assert!(serde_json::from_str::<TokenPair>(&dup).is_err());
    }
}
