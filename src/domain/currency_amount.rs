//! Currency-tagged amounts.

use core::fmt;

use num_bigint::BigInt;
use num_traits::Signed;

use super::{Currency, Fraction, Rounding};
use crate::error::{Result, RouteError};
use crate::math::{pow10, MAX_U256};

/// An amount of a specific [`Currency`], stored in raw (smallest) units.
///
/// The amount may be fractional (slippage bounds, price quotes) but its
/// integer part never exceeds `2^256 - 1`.  Arithmetic between two
/// amounts is only defined when they are denominated in the same
/// currency.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::{ChainId, Currency, CurrencyAmount, Rounding, Token, TokenAddress};
///
/// let usdc: Currency = Token::new(
///     ChainId::MAINNET,
///     TokenAddress::parse("0x1").expect("ok"),
///     6,
///     "USDC",
/// )
/// .into();
/// let amount = CurrencyAmount::from_raw_amount(usdc, 1_500_000).expect("in range");
/// assert_eq!(amount.to_exact(), "1.5");
/// assert_eq!(amount.to_fixed(2, Rounding::Down).ok().as_deref(), Some("1.50"));
/// ```
#[derive(Debug, Clone)]
pub struct CurrencyAmount {
    currency: Currency,
    fraction: Fraction,
}

impl CurrencyAmount {
    /// Creates an integer amount of raw units.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`] if `raw` exceeds `2^256 - 1`.
    pub fn from_raw_amount(currency: Currency, raw: impl Into<BigInt>) -> Result<Self> {
        Self::from_fraction(currency, Fraction::from_integer(raw))
    }

    /// Creates a fractional amount `numerator / denominator` of raw units.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`] if the integer part exceeds
    /// `2^256 - 1`.
    pub fn from_fractional_amount(
        currency: Currency,
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self> {
        Self::from_fraction(currency, Fraction::new(numerator, denominator))
    }

    fn from_fraction(currency: Currency, fraction: Fraction) -> Result<Self> {
        if fraction.quotient() > *MAX_U256 {
            return Err(RouteError::InvalidArgument("AMOUNT"));
        }
        Ok(Self { currency, fraction })
    }

    /// Returns the currency of the amount.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Returns the exact raw-unit value.
    #[must_use]
    pub const fn as_fraction(&self) -> &Fraction {
        &self.fraction
    }

    /// Integer raw units, truncated toward zero.
    #[must_use]
    pub fn quotient(&self) -> BigInt {
        self.fraction.quotient()
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.fraction.is_zero()
    }

    /// Sum of two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// - [`RouteError::CurrencyMismatch`] if the currencies differ.
    /// - [`RouteError::InvalidArgument`] if the sum exceeds `2^256 - 1`.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.ensure_same_currency(other)?;
        Self::from_fraction(self.currency.clone(), &self.fraction + &other.fraction)
    }

    /// Difference of two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::CurrencyMismatch`] if the currencies differ.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.ensure_same_currency(other)?;
        Self::from_fraction(self.currency.clone(), &self.fraction - &other.fraction)
    }

    /// Scales the amount by a dimensionless factor.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`] if the result exceeds
    /// `2^256 - 1`.
    pub fn multiply(&self, factor: &Fraction) -> Result<Self> {
        Self::from_fraction(self.currency.clone(), &self.fraction * factor)
    }

    /// Divides the amount by a dimensionless factor.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`] if the result exceeds
    /// `2^256 - 1`.
    pub fn divide(&self, divisor: &Fraction) -> Result<Self> {
        Self::from_fraction(self.currency.clone(), &self.fraction / divisor)
    }

    /// Returns `true` if `self < other`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::CurrencyMismatch`] if the currencies differ.
    pub fn less_than(&self, other: &Self) -> Result<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.fraction.less_than(&other.fraction))
    }

    /// Returns `true` if both amounts have the same value.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::CurrencyMismatch`] if the currencies differ.
    pub fn equal_to(&self, other: &Self) -> Result<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.fraction.equal_to(&other.fraction))
    }

    /// Returns `true` if `self > other`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::CurrencyMismatch`] if the currencies differ.
    pub fn greater_than(&self, other: &Self) -> Result<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.fraction.greater_than(&other.fraction))
    }

    /// Renders the human-unit value to `significant_digits`.
    ///
    /// # Errors
    ///
    /// Same as [`Fraction::to_significant`].
    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String> {
        self.human_units().to_significant(significant_digits, rounding)
    }

    /// Renders the human-unit value with `decimal_places` decimals.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`] if `decimal_places` exceeds
    /// the currency decimals.
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> Result<String> {
        if decimal_places > u32::from(self.currency.decimals()) {
            return Err(RouteError::InvalidArgument("DECIMALS"));
        }
        self.human_units().to_fixed(decimal_places, rounding)
    }

    /// Exact human-unit value of the integer raw amount, without trailing
    /// zeros.
    #[must_use]
    pub fn to_exact(&self) -> String {
        let decimals = u32::from(self.currency.decimals());
        let raw = self.quotient();
        let digits = raw.abs().to_string();
        let body = if decimals == 0 {
            digits
        } else {
            let width = decimals as usize;
            let padded = if digits.len() <= width {
                format!("{}{digits}", "0".repeat(width + 1 - digits.len()))
            } else {
                digits
            };
            let (int_part, frac_part) = padded.split_at(padded.len() - width);
            let frac_part = frac_part.trim_end_matches('0');
            if frac_part.is_empty() {
                int_part.to_owned()
            } else {
                format!("{int_part}.{frac_part}")
            }
        };
        if raw.is_negative() {
            format!("-{body}")
        } else {
            body
        }
    }

    /// The same amount denominated in the currency's wrapped token.
    #[must_use]
    pub fn wrapped(&self) -> Self {
        Self {
            currency: Currency::Token(self.currency.wrapped().clone()),
            fraction: self.fraction.clone(),
        }
    }

    fn human_units(&self) -> Fraction {
        &self.fraction / &Fraction::from_integer(pow10(u32::from(self.currency.decimals())))
    }

    fn ensure_same_currency(&self, other: &Self) -> Result<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(RouteError::CurrencyMismatch("CURRENCY"))
        }
    }
}

impl PartialEq for CurrencyAmount {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.fraction == other.fraction
    }
}

impl Eq for CurrencyAmount {}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_exact(), self.currency.symbol())
    }
}
