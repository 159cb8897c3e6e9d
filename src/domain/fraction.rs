//! Exact rational number over arbitrary-precision integers.
//!
//! [`Fraction`] is the value type underneath every amount, price and
//! percentage in the crate.  Arithmetic never reduces to lowest terms:
//! mixed denominators are cross-multiplied, and because both parts are
//! [`BigInt`] the growth is harmless.
//!
//! # Formatting
//!
//! [`to_significant`](Fraction::to_significant) and
//! [`to_fixed`](Fraction::to_fixed) round the *exact* value once, using the
//! requested [`Rounding`] mode on the magnitude, so negative values format
//! symmetrically.
//!
//! ```
//! use hydra_route::domain::{Fraction, Rounding};
//!
//! let third = Fraction::new(1, 3);
//! assert_eq!(third.to_fixed(4, Rounding::Down).ok().as_deref(), Some("0.3333"));
//! assert_eq!(third.to_significant(2, Rounding::Up).ok().as_deref(), Some("0.34"));
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

use super::Rounding;
use crate::error::{Result, RouteError};
use crate::math::div_round;

/// A rational number `numerator / denominator`.
///
/// The denominator must be non-zero.  This is the caller's obligation and
/// is not checked at construction; operations on a zero-denominator value
/// produce meaningless results (formatting reports it as an error).
///
/// Equality and ordering compare the represented *value*, so
/// `Fraction::new(1, 2) == Fraction::new(2, 4)`.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::Fraction;
/// use num_bigint::BigInt;
///
/// let a = Fraction::new(7, 2);
/// assert_eq!(a.quotient(), BigInt::from(3));
/// assert_eq!(Fraction::new(-7, 2).quotient(), BigInt::from(-3));
///
/// let b = Fraction::new(1, 3);
/// assert_eq!(&(&a + &b) - &b, a);
/// ```
#[derive(Debug, Clone)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    /// Creates a fraction from any integer-like numerator and denominator.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Self {
        Self {
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }

    /// Creates the integer fraction `value / 1`.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        Self::new(value, BigInt::one())
    }

    /// The fraction `0 / 1`.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(BigInt::zero(), BigInt::one())
    }

    /// The fraction `1 / 1`.
    #[must_use]
    pub fn one() -> Self {
        Self::new(BigInt::one(), BigInt::one())
    }

    /// Returns the numerator.
    #[must_use]
    pub const fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// Returns the denominator.
    #[must_use]
    pub const fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Integer part of the value, truncated toward zero.
    #[must_use]
    pub fn quotient(&self) -> BigInt {
        &self.numerator / &self.denominator
    }

    /// What is left after removing [`quotient`](Self::quotient), over the
    /// same denominator.  Takes the sign of the numerator.
    #[must_use]
    pub fn remainder(&self) -> Self {
        Self::new(&self.numerator % &self.denominator, self.denominator.clone())
    }

    /// Swaps numerator and denominator.
    #[must_use]
    pub fn invert(&self) -> Self {
        Self::new(self.denominator.clone(), self.numerator.clone())
    }

    /// Returns `true` if the value is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Returns `true` if the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        !self.numerator.is_zero()
            && (self.numerator.is_negative() != self.denominator.is_negative())
    }

    /// Returns `true` if `self < other`.
    #[must_use]
    pub fn less_than(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Less
    }

    /// Returns `true` if `self` and `other` represent the same value.
    #[must_use]
    pub fn equal_to(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }

    /// Returns `true` if `self > other`.
    #[must_use]
    pub fn greater_than(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    /// Renders the value rounded to `significant_digits` significant
    /// digits.  Trailing fractional zeros are dropped.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidArgument`] if `significant_digits` is zero or
    ///   the denominator is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use hydra_route::domain::{Fraction, Rounding};
    ///
    /// let v = Fraction::new(123_456, 1);
    /// assert_eq!(v.to_significant(2, Rounding::HalfUp).ok().as_deref(), Some("120000"));
    /// assert_eq!(Fraction::new(-3, 2).to_significant(1, Rounding::HalfUp).ok().as_deref(), Some("-2"));
    /// ```
    pub fn to_significant(&self, significant_digits: u32, rounding: Rounding) -> Result<String> {
        if significant_digits == 0 {
            return Err(RouteError::InvalidArgument(
                "significant digits must be positive",
            ));
        }
        if self.denominator.is_zero() {
            return Err(RouteError::InvalidArgument("zero denominator"));
        }
        if self.numerator.is_zero() {
            return Ok("0".to_owned());
        }

        let num = self.numerator.magnitude();
        let den = self.denominator.magnitude();

        // floor(log10(num / den)) from digit counts, corrected by one comparison
        let mut exponent = decimal_len(num) - decimal_len(den);
        if !at_least_pow10(num, den, exponent) {
            exponent -= 1;
        }

        let mut shift = i64::from(significant_digits) - 1 - exponent;
        let mut scaled = scale_and_round(num, den, shift, rounding)?;
        if scaled == pow10(u64::from(significant_digits)) {
            scaled /= 10u32;
            shift -= 1;
        }

        let body = if shift <= 0 {
            let mut digits = scaled.to_string();
            digits.extend(core::iter::repeat('0').take(shift.unsigned_abs() as usize));
            digits
        } else {
            let rendered = insert_point(&scaled.to_string(), shift.unsigned_abs() as usize);
            let trimmed = rendered.trim_end_matches('0');
            trimmed.trim_end_matches('.').to_owned()
        };
        Ok(with_sign(body, self.is_negative()))
    }

    /// Renders the value with exactly `decimal_places` digits after the
    /// decimal point.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidArgument`] if the denominator is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use hydra_route::domain::{Fraction, Rounding};
    ///
    /// let v = Fraction::new(-1, 8);
    /// assert_eq!(v.to_fixed(2, Rounding::HalfUp).ok().as_deref(), Some("-0.13"));
    /// assert_eq!(v.to_fixed(2, Rounding::Down).ok().as_deref(), Some("-0.12"));
    /// ```
    pub fn to_fixed(&self, decimal_places: u32, rounding: Rounding) -> Result<String> {
        if self.denominator.is_zero() {
            return Err(RouteError::InvalidArgument("zero denominator"));
        }
        let scaled = scale_and_round(
            self.numerator.magnitude(),
            self.denominator.magnitude(),
            i64::from(decimal_places),
            rounding,
        )?;
        let negative = self.is_negative() && !scaled.is_zero();
        let body = insert_point(&scaled.to_string(), decimal_places as usize);
        Ok(with_sign(body, negative))
    }
}

fn pow10(exponent: u64) -> BigUint {
    let mut value = BigUint::one();
    let ten = BigUint::from(10u32);
    for _ in 0..exponent {
        value *= &ten;
    }
    value
}

fn decimal_len(value: &BigUint) -> i64 {
    value.to_string().len() as i64
}

/// `num / den >= 10^exponent`
fn at_least_pow10(num: &BigUint, den: &BigUint, exponent: i64) -> bool {
    if exponent >= 0 {
        *num >= den * pow10(exponent.unsigned_abs())
    } else {
        num * pow10(exponent.unsigned_abs()) >= *den
    }
}

/// `round(num / den * 10^shift)`
fn scale_and_round(
    num: &BigUint,
    den: &BigUint,
    shift: i64,
    rounding: Rounding,
) -> Result<BigUint> {
    let (n, d) = if shift >= 0 {
        (num * pow10(shift.unsigned_abs()), den.clone())
    } else {
        (num.clone(), den * pow10(shift.unsigned_abs()))
    };
    div_round(&n, &d, rounding).ok_or(RouteError::InvalidArgument("zero denominator"))
}

fn insert_point(digits: &str, decimals: usize) -> String {
    if decimals == 0 {
        return digits.to_owned();
    }
    let padded = if digits.len() <= decimals {
        format!("{}{digits}", "0".repeat(decimals + 1 - digits.len()))
    } else {
        digits.to_owned()
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    format!("{int_part}.{frac_part}")
}

fn with_sign(body: String, negative: bool) -> String {
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = &self.numerator * &other.denominator;
        let rhs = &other.numerator * &self.denominator;
        let ordering = lhs.cmp(&rhs);
        // cross-multiplying by a negative denominator product flips the order
        if self.denominator.is_negative() != other.denominator.is_negative() {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

impl<'a> Add<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn add(self, rhs: &'a Fraction) -> Fraction {
        if self.denominator == rhs.denominator {
            return Fraction::new(&self.numerator + &rhs.numerator, self.denominator.clone());
        }
        Fraction::new(
            &self.numerator * &rhs.denominator + &rhs.numerator * &self.denominator,
            &self.denominator * &rhs.denominator,
        )
    }
}

impl<'a> Sub<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn sub(self, rhs: &'a Fraction) -> Fraction {
        if self.denominator == rhs.denominator {
            return Fraction::new(&self.numerator - &rhs.numerator, self.denominator.clone());
        }
        Fraction::new(
            &self.numerator * &rhs.denominator - &rhs.numerator * &self.denominator,
            &self.denominator * &rhs.denominator,
        )
    }
}

impl<'a> Mul<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn mul(self, rhs: &'a Fraction) -> Fraction {
        Fraction::new(
            &self.numerator * &rhs.numerator,
            &self.denominator * &rhs.denominator,
        )
    }
}

impl<'a> Div<&'a Fraction> for &'a Fraction {
    type Output = Fraction;

    fn div(self, rhs: &'a Fraction) -> Fraction {
        Fraction::new(
            &self.numerator * &rhs.denominator,
            &self.denominator * &rhs.numerator,
        )
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction::new(-&self.numerator, self.denominator.clone())
    }
}

macro_rules! forward_owned_binop {
    ($($imp:ident :: $method:ident),* $(,)?) => {
        $(
            impl $imp<Fraction> for Fraction {
                type Output = Fraction;

                fn $method(self, rhs: Fraction) -> Fraction {
                    (&self).$method(&rhs)
                }
            }
        )*
    };
}

forward_owned_binop!(Add::add, Sub::sub, Mul::mul, Div::div);
