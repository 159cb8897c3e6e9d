//! Enum dispatch over every pool model, and the canonical pool key.
//!
//! [`Pool`] wraps each concrete pool behind a single enum, enabling
//! heterogeneous routes and static dispatch without `dyn` trait objects.

use core::fmt;

use super::{ConcentratedPool, Pair};
use crate::domain::{ChainId, CurrencyAmount, FeeAmount, Price, Token, TokenAddress};
use crate::error::Result;
use crate::traits::SwapPool;

/// Canonical identity of a pool: its chain, its two token addresses in
/// sorted order and, for concentrated pools, its fee tier.
///
/// Two pool snapshots with different reserves but the same key refer to
/// the same on-chain pool.  The key is also what the
/// [`PoolAddressCache`](crate::cache::PoolAddressCache) memoizes on.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::{ChainId, FeeAmount, Token, TokenAddress};
/// use hydra_route::pools::PoolKey;
///
/// let a = Token::new(ChainId::MAINNET, TokenAddress::parse("0x2").expect("ok"), 8, "A");
/// let b = Token::new(ChainId::MAINNET, TokenAddress::parse("0x1").expect("ok"), 8, "B");
/// assert_eq!(PoolKey::constant_product(&a, &b), PoolKey::constant_product(&b, &a));
/// assert_ne!(
///     PoolKey::concentrated(&a, &b, FeeAmount::Low),
///     PoolKey::concentrated(&a, &b, FeeAmount::High),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolKey {
    chain_id: ChainId,
    token0: TokenAddress,
    token1: TokenAddress,
    fee: Option<FeeAmount>,
}

impl PoolKey {
    /// Key of the constant-product pair over `a` and `b`.
    #[must_use]
    pub fn constant_product(a: &Token, b: &Token) -> Self {
        Self::sorted(a, b, None)
    }

    /// Key of the concentrated pool over `a` and `b` in tier `fee`.
    #[must_use]
    pub fn concentrated(a: &Token, b: &Token, fee: FeeAmount) -> Self {
        Self::sorted(a, b, Some(fee))
    }

    fn sorted(a: &Token, b: &Token, fee: Option<FeeAmount>) -> Self {
        let (token0, token1) = if a.address() <= b.address() {
            (*a.address(), *b.address())
        } else {
            (*b.address(), *a.address())
        };
        Self {
            chain_id: a.chain_id(),
            token0,
            token1,
            fee,
        }
    }

    /// Returns the chain id.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Returns the smaller token address.
    #[must_use]
    pub const fn token0(&self) -> &TokenAddress {
        &self.token0
    }

    /// Returns the larger token address.
    #[must_use]
    pub const fn token1(&self) -> &TokenAddress {
        &self.token1
    }

    /// Returns the fee tier of a concentrated pool, `None` for a pair.
    #[must_use]
    pub const fn fee(&self) -> Option<FeeAmount> {
        self.fee
    }

    /// Returns `true` for a concentrated-liquidity pool key.
    #[must_use]
    pub const fn is_concentrated(&self) -> bool {
        self.fee.is_some()
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.token0, self.token1)?;
        if let Some(fee) = self.fee {
            write!(f, "-{}", fee.value())?;
        }
        Ok(())
    }
}

/// Static dispatch enum wrapping every concrete pool model.
///
/// The enum implements [`SwapPool`] by delegating each call to the inner
/// pool via `match`; quotes re-wrap the returned pool state in the same
/// variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pool {
    /// Constant-product pair.
    ConstantProduct(Pair),

    /// Concentrated-liquidity pool.
    Concentrated(ConcentratedPool),
}

/// Delegates a method call to every [`Pool`] variant.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            Pool::ConstantProduct(p) => p.$method($($arg),*),
            Pool::Concentrated(p) => p.$method($($arg),*),
        }
    };
}

impl Pool {
    /// Returns `true` for a constant-product pair.
    #[must_use]
    pub const fn is_constant_product(&self) -> bool {
        matches!(self, Self::ConstantProduct(_))
    }

    /// Returns `true` for a concentrated-liquidity pool.
    #[must_use]
    pub const fn is_concentrated(&self) -> bool {
        matches!(self, Self::Concentrated(_))
    }

    /// Returns the inner pair, if this is one.
    #[must_use]
    pub const fn as_pair(&self) -> Option<&Pair> {
        match self {
            Self::ConstantProduct(p) => Some(p),
            Self::Concentrated(_) => None,
        }
    }

    /// Returns the inner concentrated pool, if this is one.
    #[must_use]
    pub const fn as_concentrated(&self) -> Option<&ConcentratedPool> {
        match self {
            Self::ConstantProduct(_) => None,
            Self::Concentrated(p) => Some(p),
        }
    }

    /// The other token of the pool, given one of its tokens.
    ///
    /// Callers must pass a token the pool involves; any other token yields
    /// token0.
    #[must_use]
    pub fn counterpart(&self, token: &Token) -> &Token {
        if token == self.token0() {
            self.token1()
        } else {
            self.token0()
        }
    }
}

impl SwapPool for Pool {
    fn token0(&self) -> &Token {
        delegate!(self, token0())
    }

    fn token1(&self) -> &Token {
        delegate!(self, token1())
    }

    fn pool_key(&self) -> PoolKey {
        delegate!(self, pool_key())
    }

    fn get_output_amount(&self, input: &CurrencyAmount) -> Result<(CurrencyAmount, Self)> {
        match self {
            Self::ConstantProduct(p) => p
                .get_output_amount(input)
                .map(|(amount, next)| (amount, Self::ConstantProduct(next))),
            Self::Concentrated(p) => p
                .get_output_amount(input)
                .map(|(amount, next)| (amount, Self::Concentrated(next))),
        }
    }

    fn get_input_amount(&self, output: &CurrencyAmount) -> Result<(CurrencyAmount, Self)> {
        match self {
            Self::ConstantProduct(p) => p
                .get_input_amount(output)
                .map(|(amount, next)| (amount, Self::ConstantProduct(next))),
            Self::Concentrated(p) => p
                .get_input_amount(output)
                .map(|(amount, next)| (amount, Self::Concentrated(next))),
        }
    }

    fn price_of(&self, token: &Token) -> Result<Price> {
        delegate!(self, price_of(token))
    }
}

impl From<Pair> for Pool {
    fn from(pair: Pair) -> Self {
        Self::ConstantProduct(pair)
    }
}

impl From<ConcentratedPool> for Pool {
    fn from(pool: ConcentratedPool) -> Self {
        Self::Concentrated(pool)
    }
}
