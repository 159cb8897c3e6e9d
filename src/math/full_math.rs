//! 256-bit multiply-divide with a 512-bit intermediate.

use alloy_primitives::U256;

use crate::error::{Result, RouteError};

const TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
const THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

/// Computes `floor(a * b / denominator)` without losing the high bits of
/// `a * b`.
///
/// # Errors
///
/// - [`RouteError::InvalidArgument`] if `denominator` is zero.
/// - [`RouteError::Overflow`] if the quotient does not fit in 256 bits.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use hydra_route::math::full_math::mul_div;
///
/// assert_eq!(mul_div(U256::MAX, U256::MAX, U256::MAX), Ok(U256::MAX));
/// ```
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(RouteError::InvalidArgument("DENOMINATOR"));
    }

    // [prod1 prod0] = a * b as a 512-bit value
    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);
    let (mut prod1, borrow) = mm.overflowing_sub(prod0);
    if borrow {
        prod1 = prod1.wrapping_sub(U256::ONE);
    }

    if prod1.is_zero() {
        return Ok(prod0 / denominator);
    }
    if denominator <= prod1 {
        return Err(RouteError::Overflow("mul_div"));
    }

    let remainder = a.mul_mod(b, denominator);
    let (rest, borrow) = prod0.overflowing_sub(remainder);
    prod0 = rest;
    if borrow {
        prod1 = prod1.wrapping_sub(U256::ONE);
    }

    // factor powers of two out of the denominator
    let twos = denominator & denominator.wrapping_neg();
    let denominator = denominator / twos;
    prod0 /= twos;
    let flip = twos.wrapping_neg() / twos + U256::ONE;
    prod0 |= prod1.wrapping_mul(flip);

    // modular inverse of the odd denominator, correct to 256 bits after six
    // Newton steps
    let mut inv = THREE.wrapping_mul(denominator) ^ TWO;
    for _ in 0..6 {
        inv = inv.wrapping_mul(TWO.wrapping_sub(denominator.wrapping_mul(inv)));
    }

    Ok(prod0.wrapping_mul(inv))
}

/// Like [`mul_div`] but rounds up on a non-zero remainder.
///
/// # Errors
///
/// Same as [`mul_div`], plus [`RouteError::Overflow`] if rounding up
/// overflows.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256> {
    let result = mul_div(a, b, denominator)?;
    if a.mul_mod(b, denominator).is_zero() {
        return Ok(result);
    }
    result
        .checked_add(U256::ONE)
        .ok_or(RouteError::Overflow("mul_div_rounding_up"))
}

/// `ceil(a / b)`.
///
/// # Errors
///
/// Returns [`RouteError::InvalidArgument`] if `b` is zero.
pub fn div_rounding_up(a: U256, b: U256) -> Result<U256> {
    if b.is_zero() {
        return Err(RouteError::InvalidArgument("DENOMINATOR"));
    }
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::ONE)
    }
}
