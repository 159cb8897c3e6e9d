//! Fungible token identity.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use super::{ChainId, TokenAddress};
use crate::error::{Result, RouteError};

/// A fungible token on a specific chain.
///
/// Identity is `(chain_id, address)`: two tokens with the same address on
/// the same chain are equal regardless of their symbol or name metadata.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::{ChainId, Token, TokenAddress};
///
/// let a = Token::new(ChainId::MAINNET, TokenAddress::parse("0x1").expect("ok"), 8, "AAA");
/// let b = Token::new(ChainId::MAINNET, TokenAddress::parse("0x2").expect("ok"), 6, "BBB");
/// assert!(a.sorts_before(&b).expect("same chain"));
/// ```
#[derive(Debug, Clone)]
pub struct Token {
    chain_id: ChainId,
    address: TokenAddress,
    decimals: u8,
    symbol: String,
    name: Option<String>,
}

impl Token {
    /// Creates a token without a display name.
    pub fn new(
        chain_id: ChainId,
        address: TokenAddress,
        decimals: u8,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: symbol.into(),
            name: None,
        }
    }

    /// Attaches a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the chain id.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> &TokenAddress {
        &self.address
    }

    /// Returns the number of decimals of the raw unit.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` if `self` orders before `other` by address.
    ///
    /// Addresses compare as 32-byte numbers, which matches a comparison
    /// of their lowercase long forms. Short forms are not compared as
    /// text: the wrapped MOVE coin at `0xa` sorts before `0x1001`.
    ///
    /// # Errors
    ///
    /// - [`RouteError::CurrencyMismatch`] if the tokens are on different chains.
    /// - [`RouteError::InvalidArgument`] if both tokens share an address.
    pub fn sorts_before(&self, other: &Self) -> Result<bool> {
        if self.chain_id != other.chain_id {
            return Err(RouteError::CurrencyMismatch("CHAIN_IDS"));
        }
        match self.address.cmp(&other.address) {
            Ordering::Less => Ok(true),
            Ordering::Greater => Ok(false),
            Ordering::Equal => Err(RouteError::InvalidArgument("ADDRESSES")),
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id.hash(state);
        self.address.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.symbol, self.address)
    }
}
