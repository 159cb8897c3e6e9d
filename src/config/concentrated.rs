//! Snapshot configuration for concentrated-liquidity pools.

use alloy_primitives::U256;

use crate::domain::{FeeAmount, Tick, Token};
use crate::error::{Result, RouteError};
use crate::math::tick_math::{MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};

/// State snapshot of a concentrated-liquidity pool (Uniswap V3 style).
///
/// Carries everything the swap loop needs: the Q64.96 square-root price,
/// the in-range liquidity, the current tick and every initialized tick.
///
/// # Key Relationships
///
/// - Price at tick `i`: `P(i) = 1.0001^i`
/// - `sqrt_ratio_x96 = √P · 2^96`
/// - Tick spacing is implied by the fee tier.
///
/// # Validation
///
/// - The two tokens are distinct and live on the same chain.
/// - `tick_current` lies in `[MIN_TICK, MAX_TICK]`.
/// - `sqrt_ratio_x96` lies in `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
/// - Every tick index is a multiple of the fee tier's spacing.
///
/// Consistency between the price and the current tick, tick ordering and
/// the zero net-liquidity sum are checked when the pool is built, see
/// [`ConcentratedPool::new`](crate::pools::ConcentratedPool::new).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcentratedConfig {
    token_a: Token,
    token_b: Token,
    fee: FeeAmount,
    sqrt_ratio_x96: U256,
    liquidity: u128,
    tick_current: i32,
    ticks: Vec<Tick>,
}

impl ConcentratedConfig {
    /// Creates a new `ConcentratedConfig`.
    ///
    /// # Errors
    ///
    /// - [`RouteError::CurrencyMismatch`] if the tokens are on different
    ///   chains.
    /// - [`RouteError::InvalidArgument`] if the tokens are equal, or
    ///   `TICK`, `SQRT_RATIO` or `TICK_SPACING` when the corresponding
    ///   value is out of range.
    pub fn new(
        token_a: Token,
        token_b: Token,
        fee: FeeAmount,
        sqrt_ratio_x96: U256,
        liquidity: u128,
        tick_current: i32,
        ticks: Vec<Tick>,
    ) -> Result<Self> {
        let config = Self {
            token_a,
            token_b,
            fee,
            sqrt_ratio_x96,
            liquidity,
            tick_current,
            ticks,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Same as [`ConcentratedConfig::new`].
    pub fn validate(&self) -> Result<()> {
        self.token_a.sorts_before(&self.token_b)?;
        if !(MIN_TICK..=MAX_TICK).contains(&self.tick_current) {
            return Err(RouteError::InvalidArgument("TICK"));
        }
        if self.sqrt_ratio_x96 < MIN_SQRT_RATIO || self.sqrt_ratio_x96 >= MAX_SQRT_RATIO {
            return Err(RouteError::InvalidArgument("SQRT_RATIO"));
        }
        let spacing = self.fee.tick_spacing();
        if self.ticks.iter().any(|t| t.index() % spacing != 0) {
            return Err(RouteError::InvalidArgument("TICK_SPACING"));
        }
        Ok(())
    }

    /// Returns the first token as given.
    #[must_use]
    pub const fn token_a(&self) -> &Token {
        &self.token_a
    }

    /// Returns the second token as given.
    #[must_use]
    pub const fn token_b(&self) -> &Token {
        &self.token_b
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee(&self) -> FeeAmount {
        self.fee
    }

    /// Returns the Q64.96 square-root price.
    #[must_use]
    pub const fn sqrt_ratio_x96(&self) -> U256 {
        self.sqrt_ratio_x96
    }

    /// Returns the in-range liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> u128 {
        self.liquidity
    }

    /// Returns the current tick.
    #[must_use]
    pub const fn tick_current(&self) -> i32 {
        self.tick_current
    }

    /// Returns the initialized ticks.
    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }
}
