//! Token amounts between two square-root prices, and the price reached
//! after adding or removing a token amount.
//!
//! All prices are Q64.96.  Rounding always favours the pool: amounts paid
//! in round up, amounts paid out round down.

use alloy_primitives::U256;

use super::full_math::{div_rounding_up, mul_div, mul_div_rounding_up};
use super::{MAX_U160, Q96, RESOLUTION};
use crate::error::{Result, RouteError};

/// Amount of token0 between two prices for `liquidity`.
///
/// The prices may be given in either order.
///
/// # Errors
///
/// - [`RouteError::InvalidArgument`] if the lower price is zero.
/// - [`RouteError::Overflow`] if an intermediate exceeds 256 bits.
pub fn get_amount0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256> {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if lower.is_zero() {
        return Err(RouteError::InvalidArgument("SQRT_PRICE"));
    }
    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = upper - lower;

    if round_up {
        div_rounding_up(mul_div_rounding_up(numerator1, numerator2, upper)?, lower)
    } else {
        Ok(mul_div(numerator1, numerator2, upper)? / lower)
    }
}

/// Amount of token1 between two prices for `liquidity`.
///
/// # Errors
///
/// Returns [`RouteError::Overflow`] if the result exceeds 256 bits.
pub fn get_amount1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256> {
    let (lower, upper) = ordered(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let liquidity = U256::from(liquidity);
    if round_up {
        mul_div_rounding_up(liquidity, upper - lower, Q96)
    } else {
        mul_div(liquidity, upper - lower, Q96)
    }
}

/// Price after `amount_in` of the input token enters the pool.
///
/// # Errors
///
/// - [`RouteError::InvalidArgument`] if the price or liquidity is zero.
/// - [`RouteError::Overflow`] if the new price leaves the `U160` range.
pub fn get_next_sqrt_price_from_input(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256> {
    ensure_state(sqrt_price_x96, liquidity)?;
    if zero_for_one {
        next_from_amount0_rounding_up(sqrt_price_x96, liquidity, amount_in, true)
    } else {
        next_from_amount1_rounding_down(sqrt_price_x96, liquidity, amount_in, true)
    }
}

/// Price after `amount_out` of the output token leaves the pool.
///
/// # Errors
///
/// - [`RouteError::InvalidArgument`] if the price or liquidity is zero.
/// - [`RouteError::InsufficientReserves`] if the pool cannot pay out
///   `amount_out` at any price.
pub fn get_next_sqrt_price_from_output(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256> {
    ensure_state(sqrt_price_x96, liquidity)?;
    if zero_for_one {
        next_from_amount1_rounding_down(sqrt_price_x96, liquidity, amount_out, false)
    } else {
        next_from_amount0_rounding_up(sqrt_price_x96, liquidity, amount_out, false)
    }
}

fn ensure_state(sqrt_price_x96: U256, liquidity: u128) -> Result<()> {
    if sqrt_price_x96.is_zero() {
        return Err(RouteError::InvalidArgument("SQRT_PRICE"));
    }
    if liquidity == 0 {
        return Err(RouteError::InvalidArgument("LIQUIDITY"));
    }
    Ok(())
}

fn ordered(a: U256, b: U256) -> (U256, U256) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

fn next_from_amount0_rounding_up(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256> {
    if amount.is_zero() {
        return Ok(sqrt_price_x96);
    }
    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let product = amount.wrapping_mul(sqrt_price_x96);
    let product_fits = product / amount == sqrt_price_x96;

    if add {
        if product_fits {
            let (denominator, overflowed) = numerator1.overflowing_add(product);
            if !overflowed {
                return mul_div_rounding_up(numerator1, sqrt_price_x96, denominator);
            }
        }
        let denominator = (numerator1 / sqrt_price_x96)
            .checked_add(amount)
            .ok_or(RouteError::Overflow("sqrt price denominator"))?;
        div_rounding_up(numerator1, denominator)
    } else {
        if !product_fits || numerator1 <= product {
            return Err(RouteError::InsufficientReserves);
        }
        mul_div_rounding_up(numerator1, sqrt_price_x96, numerator1 - product)
    }
}

fn next_from_amount1_rounding_down(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256> {
    let liquidity = U256::from(liquidity);
    if add {
        let quotient = if amount <= MAX_U160 {
            (amount << RESOLUTION) / liquidity
        } else {
            mul_div(amount, Q96, liquidity)?
        };
        let next = sqrt_price_x96
            .checked_add(quotient)
            .ok_or(RouteError::Overflow("U160"))?;
        if next > MAX_U160 {
            return Err(RouteError::Overflow("U160"));
        }
        Ok(next)
    } else {
        let quotient = mul_div_rounding_up(amount, Q96, liquidity)?;
        if sqrt_price_x96 <= quotient {
            return Err(RouteError::InsufficientReserves);
        }
        Ok(sqrt_price_x96 - quotient)
    }
}
