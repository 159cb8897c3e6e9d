//! Currency-tagged exchange rates.

use core::fmt;

use num_bigint::BigInt;

use super::{Currency, CurrencyAmount, Fraction, Rounding};
use crate::error::{Result, RouteError};
use crate::math::pow10;

/// The price of one `base` currency unit in units of `quote`.
///
/// Internally the ratio is kept in raw units (`quote raw / base raw`);
/// [`adjusted`](Self::adjusted) and the formatting helpers rescale it by
/// `10^base_decimals / 10^quote_decimals` so the rendered value is in human
/// units.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::{ChainId, Currency, Price, Rounding, Token, TokenAddress};
///
/// let a: Currency = Token::new(ChainId::MAINNET, TokenAddress::parse("0x1").expect("ok"), 6, "A").into();
/// let b: Currency = Token::new(ChainId::MAINNET, TokenAddress::parse("0x2").expect("ok"), 8, "B").into();
///
/// // 1 raw A buys 200 raw B, i.e. 1 A buys 2 B.
/// let price = Price::new(a, b, 1, 200);
/// assert_eq!(price.to_significant(3, Rounding::HalfUp).ok().as_deref(), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    base: Currency,
    quote: Currency,
    fraction: Fraction,
    scalar: Fraction,
}

impl Price {
    /// Creates a price of `numerator` raw quote per `denominator` raw base.
    pub fn new(
        base: Currency,
        quote: Currency,
        denominator: impl Into<BigInt>,
        numerator: impl Into<BigInt>,
    ) -> Self {
        let scalar = Fraction::new(
            pow10(u32::from(base.decimals())),
            pow10(u32::from(quote.decimals())),
        );
        Self {
            base,
            quote,
            fraction: Fraction::new(numerator, denominator),
            scalar,
        }
    }

    /// The price implied by exchanging `base_amount` for `quote_amount`.
    #[must_use]
    pub fn from_amounts(base_amount: &CurrencyAmount, quote_amount: &CurrencyAmount) -> Self {
        let ratio = quote_amount.as_fraction() / base_amount.as_fraction();
        Self::new(
            base_amount.currency().clone(),
            quote_amount.currency().clone(),
            ratio.denominator().clone(),
            ratio.numerator().clone(),
        )
    }

    /// Returns the base currency.
    #[must_use]
    pub const fn base_currency(&self) -> &Currency {
        &self.base
    }

    /// Returns the quote currency.
    #[must_use]
    pub const fn quote_currency(&self) -> &Currency {
        &self.quote
    }

    /// Raw-unit ratio `quote / base`.
    #[must_use]
    pub const fn as_fraction(&self) -> &Fraction {
        &self.fraction
    }

    /// Swaps base and quote.
    #[must_use]
    pub fn invert(&self) -> Self {
        Self::new(
            self.quote.clone(),
            self.base.clone(),
            self.fraction.numerator().clone(),
            self.fraction.denominator().clone(),
        )
    }

    /// Composes `self` (A→B) with `other` (B→C) into A→C.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::CurrencyMismatch`] if `self`'s quote is not
    /// `other`'s base.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        if self.quote != other.base {
            return Err(RouteError::CurrencyMismatch("TOKEN"));
        }
        let product = &self.fraction * &other.fraction;
        Ok(Self::new(
            self.base.clone(),
            other.quote.clone(),
            product.denominator().clone(),
            product.numerator().clone(),
        ))
    }

    /// Converts an amount of the base currency into the quote currency.
    ///
    /// # Errors
    ///
    /// - [`RouteError::CurrencyMismatch`] if `amount` is not in the base
    ///   currency.
    /// - [`RouteError::InvalidArgument`] if the result exceeds `2^256 - 1`.
    pub fn quote(&self, amount: &CurrencyAmount) -> Result<CurrencyAmount> {
        if amount.currency() != &self.base {
            return Err(RouteError::CurrencyMismatch("TOKEN"));
        }
        let result = &self.fraction * amount.as_fraction();
        CurrencyAmount::from_fractional_amount(
            self.quote.clone(),
            result.numerator().clone(),
            result.denominator().clone(),
        )
    }

    /// Human-unit ratio.
    #[must_use]
    pub fn adjusted(&self) -> Fraction {
        &self.fraction * &self.scalar
    }

    /// Renders the human-unit price to `significant_digits`.
    ///
    /// # Errors
    ///
    /// Same as [`Fraction::to_significant`].
    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String> {
        self.adjusted().to_significant(significant_digits, rounding)
    }

    /// Renders the human-unit price with `decimal_places` decimals.
    ///
    /// # Errors
    ///
    /// Same as [`Fraction::to_fixed`].
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> Result<String> {
        self.adjusted().to_fixed(decimal_places, rounding)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_significant(6, Rounding::HalfUp) {
            Ok(v) => write!(f, "{v} {}/{}", self.quote.symbol(), self.base.symbol()),
            Err(_) => write!(f, "{} {}/{}", self.fraction, self.quote.symbol(), self.base.symbol()),
        }
    }
}
