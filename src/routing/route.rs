//! Ordered chains of pools from an input to an output currency.

use core::fmt;

use once_cell::sync::OnceCell;

use crate::domain::{ChainId, Currency, Price, Token};
use crate::error::{Result, RouteError};
use crate::pools::Pool;
use crate::traits::SwapPool;

/// Which pool models a route passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Every hop is a constant-product pair.
    ConstantProduct,
    /// Every hop is a concentrated-liquidity pool.
    Concentrated,
    /// Both models appear.
    Mixed,
}

impl Protocol {
    fn classify(pools: &[Pool]) -> Self {
        if pools.iter().all(Pool::is_constant_product) {
            Self::ConstantProduct
        } else if pools.iter().all(Pool::is_concentrated) {
            Self::Concentrated
        } else {
            Self::Mixed
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConstantProduct => write!(f, "ConstantProduct"),
            Self::Concentrated => write!(f, "Concentrated"),
            Self::Mixed => write!(f, "Mixed"),
        }
    }
}

/// A validated path through one or more pools.
///
/// The token path is inferred from the wrapped input: each hop moves to
/// the side of the pool that is not the running token.  The input and
/// output may be native currencies; pools always hold their wrapped
/// tokens.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::{ChainId, Currency, CurrencyAmount, Token, TokenAddress};
/// use hydra_route::pools::{Pair, Pool};
/// use hydra_route::routing::{Protocol, Route};
///
/// let token = |addr: &str, sym: &str| {
///     Token::new(ChainId::MAINNET, TokenAddress::parse(addr).expect("ok"), 8, sym)
/// };
/// let (a, b) = (token("0x1", "A"), token("0x2", "B"));
/// let pair = Pair::new(
///     CurrencyAmount::from_raw_amount(a.clone().into(), 1_000).expect("ok"),
///     CurrencyAmount::from_raw_amount(b.clone().into(), 2_000).expect("ok"),
/// )
/// .expect("valid pair");
///
/// let route = Route::new(vec![Pool::from(pair)], a.clone().into(), b.clone().into())
///     .expect("valid route");
/// assert_eq!(route.protocol(), Protocol::ConstantProduct);
/// assert_eq!(route.path(), &[a, b]);
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    pools: Vec<Pool>,
    path: Vec<Token>,
    input: Currency,
    output: Currency,
    protocol: Protocol,
    mid_price: OnceCell<Price>,
}

impl Route {
    /// Validates the pool chain and infers the token path.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::RouteInvalid`] naming the failed check:
    ///
    /// - `POOLS` if `pools` is empty
    /// - `CHAIN_IDS` if a pool lives on another chain than `input`
    /// - `INPUT` / `OUTPUT` if the first / last pool lacks the wrapped
    ///   input / output
    /// - `PATH` if consecutive pools do not share the running token, or
    ///   the path does not end at the wrapped output
    pub fn new(pools: Vec<Pool>, input: Currency, output: Currency) -> Result<Self> {
        let (Some(first), Some(last)) = (pools.first(), pools.last()) else {
            return Err(RouteError::RouteInvalid("POOLS"));
        };
        let chain_id = input.chain_id();
        if pools.iter().any(|pool| pool.chain_id() != chain_id) {
            return Err(RouteError::RouteInvalid("CHAIN_IDS"));
        }
        if !first.involves_token(input.wrapped()) {
            return Err(RouteError::RouteInvalid("INPUT"));
        }
        if !last.involves_token(output.wrapped()) {
            return Err(RouteError::RouteInvalid("OUTPUT"));
        }

        let mut path = Vec::with_capacity(pools.len() + 1);
        path.push(input.wrapped().clone());
        for pool in &pools {
            let current = &path[path.len() - 1];
            if !pool.involves_token(current) {
                return Err(RouteError::RouteInvalid("PATH"));
            }
            let next = pool.counterpart(current).clone();
            path.push(next);
        }
        if path.last() != Some(output.wrapped()) {
            return Err(RouteError::RouteInvalid("PATH"));
        }

        let protocol = Protocol::classify(&pools);
        Ok(Self {
            pools,
            path,
            input,
            output,
            protocol,
            mid_price: OnceCell::new(),
        })
    }

    /// Returns the pools in hop order.
    #[must_use]
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// Returns the wrapped tokens visited, input first.
    #[must_use]
    pub fn path(&self) -> &[Token] {
        &self.path
    }

    /// Returns the input currency.
    #[must_use]
    pub const fn input(&self) -> &Currency {
        &self.input
    }

    /// Returns the output currency.
    #[must_use]
    pub const fn output(&self) -> &Currency {
        &self.output
    }

    /// Returns the pool models the route passes through.
    #[must_use]
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns the chain every pool lives on.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.input.chain_id()
    }

    /// Returns `true` for a route through a single pool.
    #[must_use]
    pub fn is_single_hop(&self) -> bool {
        self.pools.len() == 1
    }

    /// Spot price of the output in terms of the input, before any swap.
    ///
    /// The product of every hop's pool price, computed once.
    ///
    /// # Errors
    ///
    /// Propagates pool price lookups; unreachable for a validated route.
    pub fn mid_price(&self) -> Result<&Price> {
        self.mid_price.get_or_try_init(|| {
            let mut hops = self.pools.iter().zip(&self.path);
            let Some((pool, token)) = hops.next() else {
                return Err(RouteError::RouteInvalid("POOLS"));
            };
            let mut price = pool.price_of(token)?;
            for (pool, token) in hops {
                price = price.multiply(&pool.price_of(token)?)?;
            }
            let ratio = price.as_fraction();
            Ok(Price::new(
                self.input.clone(),
                self.output.clone(),
                ratio.denominator().clone(),
                ratio.numerator().clone(),
            ))
        })
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.pools == other.pools && self.input == other.input && self.output == other.output
    }
}

impl Eq for Route {}
