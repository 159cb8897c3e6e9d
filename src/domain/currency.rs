//! Native currency and the `Currency` sum type.

use core::fmt;

use super::{ChainId, Token};

/// The chain's native currency.
///
/// Pools never hold the native currency directly; they hold its
/// [`wrapped`](Self::wrapped) token.  Instances are normally obtained from a
/// [`CurrencyRegistry`](crate::registry::CurrencyRegistry).
#[derive(Debug, Clone)]
pub struct NativeCurrency {
    chain_id: ChainId,
    decimals: u8,
    symbol: String,
    name: String,
    wrapped: Token,
}

impl NativeCurrency {
    /// Creates a native currency backed by `wrapped`.
    pub fn new(
        chain_id: ChainId,
        decimals: u8,
        symbol: impl Into<String>,
        name: impl Into<String>,
        wrapped: Token,
    ) -> Self {
        Self {
            chain_id,
            decimals,
            symbol: symbol.into(),
            name: name.into(),
            wrapped,
        }
    }

    /// Returns the chain id.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Returns the token pools use in place of this currency.
    #[must_use]
    pub const fn wrapped(&self) -> &Token {
        &self.wrapped
    }

    /// Returns the number of decimals.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for NativeCurrency {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id
    }
}

impl Eq for NativeCurrency {}

/// Either the native currency or a token.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::{ChainId, Currency, Token, TokenAddress};
///
/// let token = Token::new(ChainId::MAINNET, TokenAddress::parse("0x1").expect("ok"), 6, "USDC");
/// let currency = Currency::from(token.clone());
/// assert!(!currency.is_native());
/// assert_eq!(currency.wrapped(), &token);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Currency {
    /// The chain's native currency.
    Native(NativeCurrency),
    /// A fungible token.
    Token(Token),
}

impl Currency {
    /// Returns `true` for the native currency.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }

    /// Returns `true` for a token.
    #[must_use]
    pub const fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    /// The token that represents this currency inside pools.
    #[must_use]
    pub const fn wrapped(&self) -> &Token {
        match self {
            Self::Native(native) => native.wrapped(),
            Self::Token(token) => token,
        }
    }

    /// Returns the chain id.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        match self {
            Self::Native(native) => native.chain_id(),
            Self::Token(token) => token.chain_id(),
        }
    }

    /// Returns the number of decimals.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        match self {
            Self::Native(native) => native.decimals(),
            Self::Token(token) => token.decimals(),
        }
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Native(native) => native.symbol(),
            Self::Token(token) => token.symbol(),
        }
    }
}

impl From<Token> for Currency {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<NativeCurrency> for Currency {
    fn from(native: NativeCurrency) -> Self {
        Self::Native(native)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(native) => write!(f, "{}(native)", native.symbol()),
            Self::Token(token) => write!(f, "{token}"),
        }
    }
}
