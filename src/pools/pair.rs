//! Constant-product pair (`x · y = k`).
//!
//! A [`Pair`] holds the reserves of two tokens in canonical order.  Swaps
//! charge a 0.3% fee on the input, taken **before** the pricing formula
//! is applied, with truncating integer division matching the on-chain
//! router exactly.
//!
//! # Swap Algorithm (exact input, token in → token out)
//!
//! 1. `in_with_fee = amount_in × 997`
//! 2. `amount_out = in_with_fee × reserve_out / (reserve_in × 1000 + in_with_fee)`
//! 3. `reserve_in += amount_in` (fee stays in the pool)
//! 4. `reserve_out -= amount_out`
//!
//! # Swap Algorithm (exact output)
//!
//! 1. `amount_in = reserve_in × amount_out × 1000 / ((reserve_out − amount_out) × 997) + 1`
//! 2. reserves update as above
//!
//! # Invariant
//!
//! After every simulated swap `k_after ≥ k_before`, because the fee
//! component increases reserves without a corresponding output.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::trace;

use crate::config::ConstantProductConfig;
use crate::domain::{ChainId, Currency, CurrencyAmount, Price, Token, TokenAddress};
use crate::error::{Result, RouteError};
use crate::math::sqrt;
use crate::pools::PoolKey;
use crate::traits::{FromConfig, SwapPool};

/// Fee-adjusted input multiplier (`1000 - 3`).
const FEE_NUMERATOR: u32 = 997;

/// Fee denominator.
const FEE_DENOMINATOR: u32 = 1_000;

/// Liquidity permanently locked by the first mint.
pub const MINIMUM_LIQUIDITY: u32 = 1_000;

/// Decimals of every pair's liquidity token.
pub const LIQUIDITY_TOKEN_DECIMALS: u8 = 8;

/// Symbol of every pair's liquidity token.
pub const LIQUIDITY_TOKEN_SYMBOL: &str = "RAZOR LP";

/// Protocol-fee share denominator used when `fee_on` is set
/// (`1 / (FEE_SHARE + 1)` of the growth in `sqrt(k)`).
const FEE_SHARE: u32 = 5;

/// A constant-product pool over two tokens.
///
/// Construct with [`Pair::new`]; the reserves are sorted so that
/// `token0().sorts_before(token1())`.  The on-chain address of the pair
/// (which is also the address of its liquidity token) is optional and can
/// be attached with [`Pair::with_address`] once resolved.
///
/// # Example
///
/// ```rust
/// use hydra_route::domain::{ChainId, Currency, CurrencyAmount, Token, TokenAddress};
/// use hydra_route::pools::Pair;
/// use hydra_route::traits::SwapPool;
///
/// let token = |addr: &str, sym: &str| -> Currency {
///     Token::new(ChainId::MAINNET, TokenAddress::parse(addr).expect("ok"), 8, sym).into()
/// };
/// let a = token("0x1", "A");
/// let b = token("0x2", "B");
///
/// let pair = Pair::new(
///     CurrencyAmount::from_raw_amount(a.clone(), 100).expect("ok"),
///     CurrencyAmount::from_raw_amount(b, 101).expect("ok"),
/// )
/// .expect("valid pair");
///
/// let input = CurrencyAmount::from_raw_amount(a, 10).expect("ok");
/// let (out, next) = pair.get_output_amount(&input).expect("quote");
/// assert_eq!(out.quotient(), 9.into());
/// assert_eq!(next.reserve0().quotient(), 110.into());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    reserve0: CurrencyAmount,
    reserve1: CurrencyAmount,
    address: Option<TokenAddress>,
}

impl Pair {
    /// Creates a pair from two reserve amounts given in any order.
    ///
    /// Native amounts are converted to their wrapped token.
    ///
    /// # Errors
    ///
    /// - [`RouteError::CurrencyMismatch`] if the tokens are on different
    ///   chains.
    /// - [`RouteError::InvalidArgument`] if both amounts are the same token.
    pub fn new(amount_a: CurrencyAmount, amount_b: CurrencyAmount) -> Result<Self> {
        let amount_a = amount_a.wrapped();
        let amount_b = amount_b.wrapped();
        let (reserve0, reserve1) = if amount_a
            .currency()
            .wrapped()
            .sorts_before(amount_b.currency().wrapped())?
        {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        Ok(Self {
            reserve0,
            reserve1,
            address: None,
        })
    }

    /// Attaches the resolved on-chain address of the pair.
    #[must_use]
    pub fn with_address(mut self, address: TokenAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// The resolved pair address, if any.
    #[must_use]
    pub const fn address(&self) -> Option<&TokenAddress> {
        self.address.as_ref()
    }

    /// Returns the reserve of token0.
    #[must_use]
    pub const fn reserve0(&self) -> &CurrencyAmount {
        &self.reserve0
    }

    /// Returns the reserve of token1.
    #[must_use]
    pub const fn reserve1(&self) -> &CurrencyAmount {
        &self.reserve1
    }

    /// Returns the reserve of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::CurrencyMismatch`] if `token` is not in the
    /// pair.
    pub fn reserve_of(&self, token: &Token) -> Result<&CurrencyAmount> {
        if token == self.token0() {
            Ok(&self.reserve0)
        } else if token == self.token1() {
            Ok(&self.reserve1)
        } else {
            Err(RouteError::CurrencyMismatch("TOKEN"))
        }
    }

    /// Mid price of token0 in token1 (`reserve1 / reserve0`).
    #[must_use]
    pub fn token0_price(&self) -> Price {
        Price::new(
            self.reserve0.currency().clone(),
            self.reserve1.currency().clone(),
            self.reserve0.quotient(),
            self.reserve1.quotient(),
        )
    }

    /// Mid price of token1 in token0 (`reserve0 / reserve1`).
    #[must_use]
    pub fn token1_price(&self) -> Price {
        Price::new(
            self.reserve1.currency().clone(),
            self.reserve0.currency().clone(),
            self.reserve1.quotient(),
            self.reserve0.quotient(),
        )
    }

    /// The pair's liquidity token.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnsupportedOperation`] until an address has
    /// been attached with [`Pair::with_address`].
    pub fn liquidity_token(&self) -> Result<Token> {
        let address = self
            .address
            .ok_or(RouteError::UnsupportedOperation("PAIR_ADDRESS_UNRESOLVED"))?;
        Ok(Token::new(
            self.chain_id(),
            address,
            LIQUIDITY_TOKEN_DECIMALS,
            LIQUIDITY_TOKEN_SYMBOL,
        )
        .with_name(format!(
            "Razor {}-{} LP",
            self.token0().symbol(),
            self.token1().symbol()
        )))
    }

    /// Liquidity minted for depositing `amount_a` and `amount_b` when the
    /// outstanding supply is `total_supply`.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidArgument`] if `total_supply` is not the
    ///   liquidity token.
    /// - [`RouteError::CurrencyMismatch`] if the amounts are not the pair's
    ///   two tokens.
    /// - [`RouteError::InsufficientInput`] if no liquidity would be minted.
    pub fn get_liquidity_minted(
        &self,
        total_supply: &CurrencyAmount,
        amount_a: &CurrencyAmount,
        amount_b: &CurrencyAmount,
    ) -> Result<CurrencyAmount> {
        let lp: Currency = self.liquidity_token()?.into();
        if total_supply.currency() != &lp {
            return Err(RouteError::InvalidArgument("LIQUIDITY"));
        }
        let (amount0, amount1) = if amount_a
            .currency()
            .wrapped()
            .sorts_before(amount_b.currency().wrapped())?
        {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        if amount0.currency().wrapped() != self.token0()
            || amount1.currency().wrapped() != self.token1()
        {
            return Err(RouteError::CurrencyMismatch("TOKEN"));
        }

        let supply = total_supply.quotient();
        let liquidity = if supply.is_zero() {
            sqrt(&(amount0.quotient() * amount1.quotient()))? - BigInt::from(MINIMUM_LIQUIDITY)
        } else {
            let share0 = amount0.quotient() * &supply / self.reserve0.quotient();
            let share1 = amount1.quotient() * &supply / self.reserve1.quotient();
            share0.min(share1)
        };
        if !liquidity.is_positive() {
            return Err(RouteError::InsufficientInput);
        }
        CurrencyAmount::from_raw_amount(lp, liquidity)
    }

    /// Amount of `token` redeemable for `liquidity` out of `total_supply`.
    ///
    /// With `fee_on`, the supply is first inflated by the protocol fee
    /// accrued since the last `k` snapshot `k_last`.
    ///
    /// # Errors
    ///
    /// - [`RouteError::CurrencyMismatch`] if `token` is not in the pair.
    /// - [`RouteError::InvalidArgument`] if `total_supply` or `liquidity`
    ///   is not the liquidity token, if `liquidity > total_supply`, if the
    ///   supply is zero, or if `fee_on` is set without `k_last`.
    pub fn get_liquidity_value(
        &self,
        token: &Token,
        total_supply: &CurrencyAmount,
        liquidity: &CurrencyAmount,
        fee_on: bool,
        k_last: Option<&BigInt>,
    ) -> Result<CurrencyAmount> {
        let reserve = self.reserve_of(token)?.quotient();
        let lp: Currency = self.liquidity_token()?.into();
        if total_supply.currency() != &lp {
            return Err(RouteError::InvalidArgument("TOTAL_SUPPLY"));
        }
        if liquidity.currency() != &lp || liquidity.quotient() > total_supply.quotient() {
            return Err(RouteError::InvalidArgument("LIQUIDITY"));
        }

        let mut supply = total_supply.quotient();
        if fee_on {
            let k_last = k_last.ok_or(RouteError::InvalidArgument("K_LAST"))?;
            if !k_last.is_zero() {
                let root_k = sqrt(&(self.reserve0.quotient() * self.reserve1.quotient()))?;
                let root_k_last = sqrt(k_last)?;
                if root_k > root_k_last {
                    let numerator = &supply * (&root_k - &root_k_last);
                    let denominator = root_k * BigInt::from(FEE_SHARE) + root_k_last;
                    supply += numerator / denominator;
                }
            }
        }
        if supply.is_zero() {
            return Err(RouteError::InvalidArgument("TOTAL_SUPPLY"));
        }

        CurrencyAmount::from_raw_amount(
            token.clone().into(),
            liquidity.quotient() * reserve / supply,
        )
    }

    /// `(reserve_in, reserve_out, input_is_token0)` for a swap selling
    /// `token_in`.
    fn orient(&self, token_in: &Token) -> Result<(&CurrencyAmount, &CurrencyAmount, bool)> {
        if token_in == self.token0() {
            Ok((&self.reserve0, &self.reserve1, true))
        } else if token_in == self.token1() {
            Ok((&self.reserve1, &self.reserve0, false))
        } else {
            Err(RouteError::CurrencyMismatch("TOKEN"))
        }
    }

    fn with_reserves(
        &self,
        reserve_in: CurrencyAmount,
        reserve_out: CurrencyAmount,
        zero_for_one: bool,
    ) -> Self {
        let (reserve0, reserve1) = if zero_for_one {
            (reserve_in, reserve_out)
        } else {
            (reserve_out, reserve_in)
        };
        Self {
            reserve0,
            reserve1,
            address: self.address,
        }
    }

    fn has_zero_reserve(&self) -> bool {
        self.reserve0.quotient().is_zero() || self.reserve1.quotient().is_zero()
    }
}

impl SwapPool for Pair {
    fn token0(&self) -> &Token {
        self.reserve0.currency().wrapped()
    }

    fn token1(&self) -> &Token {
        self.reserve1.currency().wrapped()
    }

    fn pool_key(&self) -> PoolKey {
        PoolKey::constant_product(self.token0(), self.token1())
    }

    fn get_output_amount(&self, input: &CurrencyAmount) -> Result<(CurrencyAmount, Self)> {
        let input = input.wrapped();
        let (reserve_in, reserve_out, zero_for_one) = self.orient(input.currency().wrapped())?;
        if self.has_zero_reserve() {
            return Err(RouteError::InsufficientReserves);
        }

        let in_with_fee = input.quotient() * BigInt::from(FEE_NUMERATOR);
        let numerator = &in_with_fee * reserve_out.quotient();
        let denominator = reserve_in.quotient() * BigInt::from(FEE_DENOMINATOR) + in_with_fee;
        let output = CurrencyAmount::from_raw_amount(
            reserve_out.currency().clone(),
            numerator / denominator,
        )?;
        if output.quotient().is_zero() {
            return Err(RouteError::InsufficientInput);
        }

        trace!(
            amount_in = %input.quotient(),
            amount_out = %output.quotient(),
            zero_for_one,
            "constant-product exact-input step"
        );
        let next = self.with_reserves(
            reserve_in.add(&input)?,
            reserve_out.subtract(&output)?,
            zero_for_one,
        );
        Ok((output, next))
    }

    fn get_input_amount(&self, output: &CurrencyAmount) -> Result<(CurrencyAmount, Self)> {
        let output = output.wrapped();
        let token_out = output.currency().wrapped();
        if !self.involves_token(token_out) {
            return Err(RouteError::CurrencyMismatch("TOKEN"));
        }
        let token_in = if token_out == self.token0() {
            self.token1()
        } else {
            self.token0()
        };
        let (reserve_in, reserve_out, zero_for_one) = self.orient(token_in)?;
        if self.has_zero_reserve() || output.quotient() >= reserve_out.quotient() {
            return Err(RouteError::InsufficientReserves);
        }

        let numerator =
            reserve_in.quotient() * output.quotient() * BigInt::from(FEE_DENOMINATOR);
        let denominator =
            (reserve_out.quotient() - output.quotient()) * BigInt::from(FEE_NUMERATOR);
        let input = CurrencyAmount::from_raw_amount(
            reserve_in.currency().clone(),
            numerator / denominator + 1u32,
        )?;

        trace!(
            amount_in = %input.quotient(),
            amount_out = %output.quotient(),
            zero_for_one,
            "constant-product exact-output step"
        );
        let next = self.with_reserves(
            reserve_in.add(&input)?,
            reserve_out.subtract(&output)?,
            zero_for_one,
        );
        Ok((input, next))
    }

    fn price_of(&self, token: &Token) -> Result<Price> {
        if token == self.token0() {
            Ok(self.token0_price())
        } else if token == self.token1() {
            Ok(self.token1_price())
        } else {
            Err(RouteError::CurrencyMismatch("TOKEN"))
        }
    }
}

impl FromConfig<ConstantProductConfig> for Pair {
    fn from_config(config: &ConstantProductConfig) -> Result<Self> {
        config.validate()?;
        let reserve_a = CurrencyAmount::from_raw_amount(
            Currency::from(config.token_a().clone()),
            config.reserve_a().clone(),
        )?;
        let reserve_b = CurrencyAmount::from_raw_amount(
            Currency::from(config.token_b().clone()),
            config.reserve_b().clone(),
        )?;
        let pair = Self::new(reserve_a, reserve_b)?;
        Ok(match config.address() {
            Some(address) => pair.with_address(*address),
            None => pair,
        })
    }
}
