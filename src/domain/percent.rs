//! Percentage values such as slippage tolerance and price impact.

use core::fmt;
use core::ops::{Add, Mul, Sub};

use num_bigint::BigInt;

use super::{Fraction, Rounding};
use crate::error::Result;

/// A ratio rendered as a percentage.
///
/// The wrapped [`Fraction`] holds the plain ratio (`5/1000` is 0.5%); only
/// the formatting helpers scale by 100.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::{Percent, Rounding};
///
/// let slippage = Percent::new(5, 1_000);
/// assert_eq!(slippage.to_significant(2, Rounding::HalfUp).ok().as_deref(), Some("0.5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(Fraction);

impl Percent {
    /// Creates a percentage from a ratio `numerator / denominator`.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        Self(Fraction::new(numerator, denominator))
    }

    /// Wraps an existing ratio.
    #[must_use]
    pub const fn from_fraction(fraction: Fraction) -> Self {
        Self(fraction)
    }

    /// 0%.
    #[must_use]
    pub fn zero() -> Self {
        Self(Fraction::zero())
    }

    /// 100%.
    #[must_use]
    pub fn one_hundred() -> Self {
        Self(Fraction::one())
    }

    /// Returns the underlying ratio.
    #[must_use]
    pub const fn as_fraction(&self) -> &Fraction {
        &self.0
    }

    /// Returns `true` if the ratio is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Renders the percentage (ratio × 100) to `significant_digits`.
    ///
    /// # Errors
    ///
    /// Same as [`Fraction::to_significant`].
    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String> {
        self.scaled().to_significant(significant_digits, rounding)
    }

    /// Renders the percentage (ratio × 100) with `decimal_places` decimals.
    ///
    /// # Errors
    ///
    /// Same as [`Fraction::to_fixed`].
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> Result<String> {
        self.scaled().to_fixed(decimal_places, rounding)
    }

    fn scaled(&self) -> Fraction {
        &self.0 * &Fraction::from_integer(100)
    }
}

impl From<Fraction> for Percent {
    fn from(fraction: Fraction) -> Self {
        Self(fraction)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_significant(4, Rounding::HalfUp) {
            Ok(s) => write!(f, "{s}%"),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl<'a> Add<&'a Percent> for &'a Percent {
    type Output = Percent;

    fn add(self, rhs: &'a Percent) -> Percent {
        Percent(&self.0 + &rhs.0)
    }
}

impl<'a> Sub<&'a Percent> for &'a Percent {
    type Output = Percent;

    fn sub(self, rhs: &'a Percent) -> Percent {
        Percent(&self.0 - &rhs.0)
    }
}

impl<'a> Mul<&'a Percent> for &'a Percent {
    type Output = Percent;

    fn mul(self, rhs: &'a Percent) -> Percent {
        Percent(&self.0 * &rhs.0)
    }
}
