//! Rounding helpers for arbitrary-precision integer division.
//!
//! [`div_round`] divides two non-negative big integers with an explicit
//! [`Rounding`] mode.  It is the building block behind
//! [`Fraction::to_fixed`](crate::domain::Fraction::to_fixed) and
//! [`Fraction::to_significant`](crate::domain::Fraction::to_significant),
//! which split the sign off before calling it so that rounding acts on
//! the magnitude.
//!
//! # Examples
//!
//! ```
//! use hydra_route::domain::Rounding;
//! use hydra_route::math::div_round;
//! use num_bigint::BigUint;
//!
//! let ten = BigUint::from(10u32);
//! let four = BigUint::from(4u32);
//! assert_eq!(div_round(&ten, &four, Rounding::Down), Some(BigUint::from(2u32)));
//! assert_eq!(div_round(&ten, &four, Rounding::HalfUp), Some(BigUint::from(3u32)));
//! assert_eq!(div_round(&ten, &BigUint::from(0u32), Rounding::Up), None);
//! ```

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::domain::Rounding;

/// Integer division of `numerator / denominator` with explicit rounding.
///
/// - [`Rounding::Down`]: truncation.
/// - [`Rounding::HalfUp`]: nearest integer, exact halves round up.
/// - [`Rounding::Up`]: ceiling whenever the remainder is non-zero.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub fn div_round(
    numerator: &BigUint,
    denominator: &BigUint,
    rounding: Rounding,
) -> Option<BigUint> {
    if denominator.is_zero() {
        return None;
    }
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.is_zero() {
        return Some(quotient);
    }
    let bump = match rounding {
        Rounding::Down => false,
        Rounding::Up => true,
        Rounding::HalfUp => (remainder << 1u32) >= *denominator,
    };
    if bump {
        Some(quotient + BigUint::one())
    } else {
        Some(quotient)
    }
}
