//! Core pool trait for quoting swaps and querying pool state.
//!
//! [`SwapPool`] is the capability every liquidity source must provide to
//! take part in a [`Route`](crate::routing::Route).  It covers:
//!
//! 1. **Quote forward**: [`SwapPool::get_output_amount`] returns what a
//!    given input buys.
//! 2. **Quote backward**: [`SwapPool::get_input_amount`] returns what a
//!    given output costs.
//! 3. **Price**: [`SwapPool::price_of`] returns the mid price of one side
//!    in terms of the other.
//! 4. **Identity**: [`SwapPool::token0`], [`SwapPool::token1`] and
//!    [`SwapPool::pool_key`].
//!
//! # Immutability
//!
//! Pools never mutate.  Both quoting methods return the quoted amount
//! together with the pool state *after* the simulated swap, so multi-hop
//! quoting and "what-if" analysis can chain states without cloning the
//! original.
//!
//! # Dispatch Model
//!
//! Pools are dispatched via the [`Pool`](crate::pools::Pool) enum (not
//! `dyn` trait objects).  The trait requires `Sized` because every quote
//! returns a new `Self`.

use crate::domain::{ChainId, CurrencyAmount, Price, Token, TradeType};
use crate::error::Result;
use crate::pools::PoolKey;

/// Core trait for all liquidity pools.
///
/// # Implementors
///
/// - [`Pair`](crate::pools::Pair): constant product (`x · y = k`)
/// - [`ConcentratedPool`](crate::pools::ConcentratedPool): tick-based
///   concentrated liquidity
/// - [`Pool`](crate::pools::Pool): enum dispatch over both
///
/// # Errors
///
/// Quoting methods fail with:
///
/// - [`RouteError::CurrencyMismatch`](crate::error::RouteError::CurrencyMismatch)
///   if the amount is not denominated in one of the pool's tokens.
/// - [`RouteError::InsufficientReserves`](crate::error::RouteError::InsufficientReserves)
///   if the pool cannot fill the swap.
/// - [`RouteError::InsufficientInput`](crate::error::RouteError::InsufficientInput)
///   if the swap would produce nothing.
pub trait SwapPool: Sized {
    /// The token that sorts first.
    #[must_use]
    fn token0(&self) -> &Token;

    /// The token that sorts second.
    #[must_use]
    fn token1(&self) -> &Token;

    /// Canonical identity of the pool, independent of its reserves.
    #[must_use]
    fn pool_key(&self) -> PoolKey;

    /// Returns the output bought by `input` and the pool state after the
    /// swap.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn get_output_amount(&self, input: &CurrencyAmount) -> Result<(CurrencyAmount, Self)>;

    /// Returns the input required to buy exactly `output` and the pool
    /// state after the swap.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn get_input_amount(&self, output: &CurrencyAmount) -> Result<(CurrencyAmount, Self)>;

    /// Mid price of `token` in terms of the other token of the pool.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::CurrencyMismatch`](crate::error::RouteError::CurrencyMismatch)
    /// if `token` is not part of the pool.
    fn price_of(&self, token: &Token) -> Result<Price>;

    /// Returns `true` if `token` is either side of the pool.
    #[must_use]
    fn involves_token(&self, token: &Token) -> bool {
        token == self.token0() || token == self.token1()
    }

    /// Chain both tokens live on.
    #[must_use]
    fn chain_id(&self) -> ChainId {
        self.token0().chain_id()
    }

    /// Quotes `amount` in the given direction: forward for
    /// [`TradeType::ExactInput`], backward for [`TradeType::ExactOutput`].
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn quote(
        &self,
        amount: &CurrencyAmount,
        trade_type: TradeType,
    ) -> Result<(CurrencyAmount, Self)> {
        match trade_type {
            TradeType::ExactInput => self.get_output_amount(amount),
            TradeType::ExactOutput => self.get_input_amount(amount),
        }
    }
}
