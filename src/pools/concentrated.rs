//! Concentrated-liquidity pool (tick-based ranges).
//!
//! Liquidity is active only between the ticks that bound each position.
//! The pool state is the current Q64.96 square-root price, the tick it
//! falls in, and the liquidity active at that price.  Quoting replays the
//! on-chain swap loop exactly:
//!
//! 1. Find the next initialized tick within the current bitmap word.
//! 2. Swap toward that tick's price (or the price limit, if closer) with
//!    [`compute_swap_step`].
//! 3. If the tick was reached and is initialized, cross it: apply its
//!    `liquidity_net` (negated when moving down).
//! 4. Repeat until the amount is filled or the price limit is hit.
//!
//! A swap that hits the price limit before being completely filled is
//! rejected rather than partially filled.

use alloy_primitives::U256;
use num_bigint::BigInt;
use num_traits::One;
use tracing::trace;

use super::TickList;
use crate::config::ConcentratedConfig;
use crate::domain::{Currency, CurrencyAmount, FeeAmount, Price, Tick, Token};
use crate::error::{Result, RouteError};
use crate::math::liquidity_math::add_delta;
use crate::math::swap_math::compute_swap_step;
use crate::math::tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO,
    MIN_TICK,
};
use crate::math::{from_u256, to_u256};
use crate::pools::PoolKey;
use crate::traits::{FromConfig, SwapPool};

/// A concentrated-liquidity pool snapshot.
///
/// # Example
///
/// ```rust
/// use hydra_route::domain::{ChainId, CurrencyAmount, FeeAmount, Tick, Token, TokenAddress};
/// use hydra_route::math::Q96;
/// use hydra_route::pools::ConcentratedPool;
/// use hydra_route::traits::SwapPool;
///
/// let a = Token::new(ChainId::MAINNET, TokenAddress::parse("0x1").expect("ok"), 6, "A");
/// let b = Token::new(ChainId::MAINNET, TokenAddress::parse("0x2").expect("ok"), 6, "B");
/// let liquidity = 1_000_000_000_000_000_000u128;
/// let ticks = vec![
///     Tick::new(-887_270, liquidity, liquidity as i128).expect("ok"),
///     Tick::new(887_270, liquidity, -(liquidity as i128)).expect("ok"),
/// ];
/// let pool = ConcentratedPool::new(
///     a.clone(), b, FeeAmount::Low, Q96, liquidity, 0, ticks,
/// )
/// .expect("valid pool");
///
/// let input = CurrencyAmount::from_raw_amount(a.into(), 100).expect("ok");
/// let (out, _) = pool.get_output_amount(&input).expect("quote");
/// assert_eq!(out.quotient(), 98.into());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcentratedPool {
    token0: Token,
    token1: Token,
    fee: FeeAmount,
    sqrt_ratio_x96: U256,
    liquidity: u128,
    tick_current: i32,
    ticks: TickList,
}

/// Running state of the swap loop.
struct SwapState {
    remaining: U256,
    calculated: U256,
    sqrt_price_x96: U256,
    tick: i32,
    liquidity: u128,
}

impl ConcentratedPool {
    /// Creates a pool from a state snapshot.  Tokens may be given in any
    /// order.
    ///
    /// # Errors
    ///
    /// - [`RouteError::CurrencyMismatch`] if the tokens are on different
    ///   chains.
    /// - [`RouteError::InvalidArgument`] if the tokens are equal, if
    ///   `sqrt_ratio_x96` does not lie within `tick_current`
    ///   (`PRICE_BOUNDS`), or if the tick list is invalid.
    pub fn new(
        token_a: Token,
        token_b: Token,
        fee: FeeAmount,
        sqrt_ratio_x96: U256,
        liquidity: u128,
        tick_current: i32,
        ticks: Vec<Tick>,
    ) -> Result<Self> {
        let ticks = TickList::new(ticks, fee.tick_spacing())?;
        Self::with_tick_list(token_a, token_b, fee, sqrt_ratio_x96, liquidity, tick_current, ticks)
    }

    /// Like [`ConcentratedPool::new`] with an already validated tick list.
    ///
    /// # Errors
    ///
    /// Same as [`ConcentratedPool::new`], plus
    /// [`RouteError::InvalidArgument`]`("TICK_SPACING")` if the list was
    /// built for a different spacing than `fee` implies.
    pub fn with_tick_list(
        token_a: Token,
        token_b: Token,
        fee: FeeAmount,
        sqrt_ratio_x96: U256,
        liquidity: u128,
        tick_current: i32,
        ticks: TickList,
    ) -> Result<Self> {
        if ticks.tick_spacing() != fee.tick_spacing() {
            return Err(RouteError::InvalidArgument("TICK_SPACING"));
        }
        let (token0, token1) = if token_a.sorts_before(&token_b)? {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        let lower = get_sqrt_ratio_at_tick(tick_current)?;
        let upper = get_sqrt_ratio_at_tick(tick_current + 1)?;
        if sqrt_ratio_x96 < lower || sqrt_ratio_x96 >= upper {
            return Err(RouteError::InvalidArgument("PRICE_BOUNDS"));
        }
        Ok(Self {
            token0,
            token1,
            fee,
            sqrt_ratio_x96,
            liquidity,
            tick_current,
            ticks,
        })
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee(&self) -> FeeAmount {
        self.fee
    }

    /// Returns the current Q64.96 square-root price.
    #[must_use]
    pub const fn sqrt_ratio_x96(&self) -> U256 {
        self.sqrt_ratio_x96
    }

    /// Returns the liquidity active at the current price.
    #[must_use]
    pub const fn liquidity(&self) -> u128 {
        self.liquidity
    }

    /// Returns the tick the current price falls in.
    #[must_use]
    pub const fn tick_current(&self) -> i32 {
        self.tick_current
    }

    /// Returns the tick spacing implied by the fee tier.
    #[must_use]
    pub const fn tick_spacing(&self) -> i32 {
        self.fee.tick_spacing()
    }

    /// Returns the initialized ticks.
    #[must_use]
    pub const fn ticks(&self) -> &TickList {
        &self.ticks
    }

    /// Mid price of token0 in token1: `sqrt_ratio² / 2^192`.
    #[must_use]
    pub fn token0_price(&self) -> Price {
        let sqrt = from_u256(self.sqrt_ratio_x96);
        Price::new(
            self.token0.clone().into(),
            self.token1.clone().into(),
            BigInt::one() << 192u32,
            &sqrt * &sqrt,
        )
    }

    /// Mid price of token1 in token0: `2^192 / sqrt_ratio²`.
    #[must_use]
    pub fn token1_price(&self) -> Price {
        self.token0_price().invert()
    }

    fn swap(
        &self,
        zero_for_one: bool,
        amount: U256,
        exact_input: bool,
    ) -> Result<SwapState> {
        let limit = if zero_for_one {
            MIN_SQRT_RATIO + U256::ONE
        } else {
            MAX_SQRT_RATIO - U256::ONE
        };
        let limit_ok = if zero_for_one {
            limit < self.sqrt_ratio_x96
        } else {
            limit > self.sqrt_ratio_x96
        };
        if !limit_ok {
            return Err(RouteError::InsufficientReserves);
        }

        let mut state = SwapState {
            remaining: amount,
            calculated: U256::ZERO,
            sqrt_price_x96: self.sqrt_ratio_x96,
            tick: self.tick_current,
            liquidity: self.liquidity,
        };

        while !state.remaining.is_zero() && state.sqrt_price_x96 != limit {
            let start = state.sqrt_price_x96;
            let (tick_next, initialized) = self
                .ticks
                .next_initialized_tick_within_one_word(state.tick, zero_for_one)?;
            let tick_next = tick_next.clamp(MIN_TICK, MAX_TICK);
            let sqrt_next = get_sqrt_ratio_at_tick(tick_next)?;
            let past_limit = if zero_for_one {
                sqrt_next < limit
            } else {
                sqrt_next > limit
            };
            let target = if past_limit { limit } else { sqrt_next };

            let step = compute_swap_step(
                state.sqrt_price_x96,
                target,
                state.liquidity,
                state.remaining,
                exact_input,
                self.fee.value(),
            )?;
            state.sqrt_price_x96 = step.sqrt_ratio_next_x96;

            let (consumed, produced) = if exact_input {
                (step.amount_in + step.fee_amount, step.amount_out)
            } else {
                (step.amount_out, step.amount_in + step.fee_amount)
            };
            state.remaining = state
                .remaining
                .checked_sub(consumed)
                .ok_or(RouteError::Overflow("swap remaining"))?;
            state.calculated = state
                .calculated
                .checked_add(produced)
                .ok_or(RouteError::Overflow("swap amount"))?;

            trace!(
                tick = state.tick,
                tick_next,
                initialized,
                liquidity = state.liquidity,
                amount_in = %step.amount_in,
                amount_out = %step.amount_out,
                "concentrated swap step"
            );

            if state.sqrt_price_x96 == sqrt_next {
                if initialized {
                    let net = self.ticks.get_tick(tick_next)?.liquidity_net();
                    let net = if zero_for_one {
                        net.checked_neg().ok_or(RouteError::Overflow("liquidity net"))?
                    } else {
                        net
                    };
                    state.liquidity = add_delta(state.liquidity, net)?;
                }
                state.tick = if zero_for_one { tick_next - 1 } else { tick_next };
            } else if state.sqrt_price_x96 != start {
                state.tick = get_tick_at_sqrt_ratio(state.sqrt_price_x96)?;
            }
        }

        if !state.remaining.is_zero() {
            return Err(RouteError::InsufficientReserves);
        }
        Ok(state)
    }

    fn after_swap(&self, state: &SwapState) -> Self {
        Self {
            token0: self.token0.clone(),
            token1: self.token1.clone(),
            fee: self.fee,
            sqrt_ratio_x96: state.sqrt_price_x96,
            liquidity: state.liquidity,
            tick_current: state.tick,
            ticks: self.ticks.clone(),
        }
    }

    fn other(&self, token: &Token) -> Result<(&Token, bool)> {
        if token == &self.token0 {
            Ok((&self.token1, true))
        } else if token == &self.token1 {
            Ok((&self.token0, false))
        } else {
            Err(RouteError::CurrencyMismatch("TOKEN"))
        }
    }
}

impl SwapPool for ConcentratedPool {
    fn token0(&self) -> &Token {
        &self.token0
    }

    fn token1(&self) -> &Token {
        &self.token1
    }

    fn pool_key(&self) -> PoolKey {
        PoolKey::concentrated(&self.token0, &self.token1, self.fee)
    }

    fn get_output_amount(&self, input: &CurrencyAmount) -> Result<(CurrencyAmount, Self)> {
        let (token_out, zero_for_one) = self.other(input.currency().wrapped())?;
        let state = self.swap(zero_for_one, to_u256(&input.quotient())?, true)?;
        let amount_out = state.calculated;
        if amount_out.is_zero() {
            return Err(RouteError::InsufficientInput);
        }
        let output = CurrencyAmount::from_raw_amount(
            Currency::from(token_out.clone()),
            from_u256(amount_out),
        )?;
        Ok((output, self.after_swap(&state)))
    }

    fn get_input_amount(&self, output: &CurrencyAmount) -> Result<(CurrencyAmount, Self)> {
        let (token_in, out_is_token0) = self.other(output.currency().wrapped())?;
        let zero_for_one = !out_is_token0;
        let state = self.swap(zero_for_one, to_u256(&output.quotient())?, false)?;
        let amount_in = state.calculated;
        if amount_in.is_zero() {
            return Err(RouteError::InsufficientInput);
        }
        let input = CurrencyAmount::from_raw_amount(
            Currency::from(token_in.clone()),
            from_u256(amount_in),
        )?;
        Ok((input, self.after_swap(&state)))
    }

    fn price_of(&self, token: &Token) -> Result<Price> {
        if token == &self.token0 {
            Ok(self.token0_price())
        } else if token == &self.token1 {
            Ok(self.token1_price())
        } else {
            Err(RouteError::CurrencyMismatch("TOKEN"))
        }
    }
}

impl FromConfig<ConcentratedConfig> for ConcentratedPool {
    fn from_config(config: &ConcentratedConfig) -> Result<Self> {
        config.validate()?;
        Self::new(
            config.token_a().clone(),
            config.token_b().clone(),
            config.fee(),
            config.sqrt_ratio_x96(),
            config.liquidity(),
            config.tick_current(),
            config.ticks().to_vec(),
        )
    }
}
