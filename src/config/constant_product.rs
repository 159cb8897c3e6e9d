//! Snapshot configuration for constant-product pairs.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::domain::{Token, TokenAddress};
use crate::error::{Result, RouteError};
use crate::math::MAX_U256;

/// Reserve snapshot of a constant-product pair (`x · y = k`).
///
/// Reserves are raw on-chain units, as returned by the pair's
/// `get_reserves` view.  Tokens may be given in any order; the pair sorts
/// them on construction.
///
/// # Validation
///
/// - The two tokens are distinct and live on the same chain.
/// - Both reserves are non-negative and fit in 256 bits.
///
/// Empty reserves are a valid snapshot; quoting against them fails with
/// [`RouteError::InsufficientReserves`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductConfig {
    token_a: Token,
    token_b: Token,
    reserve_a: BigInt,
    reserve_b: BigInt,
    address: Option<TokenAddress>,
}

impl ConstantProductConfig {
    /// Creates a new `ConstantProductConfig`.
    ///
    /// # Errors
    ///
    /// - [`RouteError::CurrencyMismatch`] if the tokens are on different
    ///   chains.
    /// - [`RouteError::InvalidArgument`] if the tokens are equal or a
    ///   reserve is out of range (`RESERVE`).
    pub fn new(
        token_a: Token,
        token_b: Token,
        reserve_a: impl Into<BigInt>,
        reserve_b: impl Into<BigInt>,
    ) -> Result<Self> {
        let config = Self {
            token_a,
            token_b,
            reserve_a: reserve_a.into(),
            reserve_b: reserve_b.into(),
            address: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Attaches the on-chain pair address.
    #[must_use]
    pub fn with_address(mut self, address: TokenAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Same as [`ConstantProductConfig::new`].
    pub fn validate(&self) -> Result<()> {
        self.token_a.sorts_before(&self.token_b)?;
        for reserve in [&self.reserve_a, &self.reserve_b] {
            if reserve.is_negative() || *reserve > *MAX_U256 {
                return Err(RouteError::InvalidArgument("RESERVE"));
            }
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

    /// Returns the reserve of token A.
    #[must_use]
    pub const fn reserve_a(&self) -> &BigInt {
        &self.reserve_a
    }

    /// Returns the reserve of token B.
    #[must_use]
    pub const fn reserve_b(&self) -> &BigInt {
        &self.reserve_b
    }

    /// Returns the pair address, if attached.
    #[must_use]
    pub const fn address(&self) -> Option<&TokenAddress> {
        self.address.as_ref()
    }
}
