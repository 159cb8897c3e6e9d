//! Integer math shared by the pool models.
//!
//! Two number systems coexist here.  Constant-product math, amounts and
//! prices use arbitrary-precision [`BigInt`]s.  Concentrated-liquidity math
//! reproduces the on-chain contract bit for bit and therefore runs on
//! fixed-width [`U256`] with explicit overflow checks.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`bit_math`] | [`most_significant_bit`] |
//! | [`sqrt`](mod@sqrt) | Integer square root by Newton's method |
//! | [`full_math`] | `mul_div` with a 512-bit intermediate |
//! | [`tick_math`] | Tick ↔ Q64.96 square-root price |
//! | [`sqrt_price_math`] | Token deltas between two prices |
//! | [`swap_math`] | One step of the swap loop |
//! | [`liquidity_math`] | Signed liquidity deltas |

pub mod bit_math;
pub mod full_math;
pub mod liquidity_math;
mod rounding;
pub mod sqrt;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_math;

use alloy_primitives::U256;
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed};
use once_cell::sync::Lazy;

use crate::error::{Result, RouteError};

pub use bit_math::most_significant_bit;
pub use rounding::div_round;
pub use sqrt::sqrt;

/// `2^256 - 1`, the largest raw amount a currency can hold.
pub static MAX_U256: Lazy<BigInt> = Lazy::new(|| (BigInt::one() << 256u32) - 1);

/// Number of fractional bits in a Q64.96 value.
pub const RESOLUTION: usize = 96;

/// `2^96`.
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

/// `2^160 - 1`, the bound on square-root prices.
pub const MAX_U160: U256 = U256::from_limbs([u64::MAX, u64::MAX, u32::MAX as u64, 0]);

/// `10^exponent`.
#[must_use]
pub fn pow10(exponent: u32) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exponent as usize)
}

/// Converts a non-negative big integer to `U256`.
///
/// # Errors
///
/// Returns [`RouteError::Overflow`] if `value` is negative or wider than
/// 256 bits.
pub fn to_u256(value: &BigInt) -> Result<U256> {
    if value.is_negative() {
        return Err(RouteError::Overflow("negative value"));
    }
    let (_, bytes) = value.to_bytes_be();
    U256::try_from_be_slice(&bytes).ok_or(RouteError::Overflow("U256"))
}

/// Converts a `U256` to a big integer.
#[must_use]
pub fn from_u256(value: U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(Q96, U256::ONE << 96);
        assert_eq!(MAX_U160, (U256::ONE << 160) - U256::ONE);
        assert_eq!(from_u256(U256::MAX), *MAX_U256);
    }

    #[test]
    fn u256_conversion_round_trips() {
        let v = BigInt::from(123_456_789u64) << 100u32;
        let Ok(u) = to_u256(&v) else {
            panic!("fits");
        };
        assert_eq!(from_u256(u), v);
    }

    #[test]
    fn u256_conversion_rejects_out_of_range() {
        assert!(to_u256(&BigInt::from(-1)).is_err());
        assert!(to_u256(&(&*MAX_U256 + 1)).is_err());
        assert_eq!(to_u256(&BigInt::from(0)), Ok(U256::ZERO));
    }

    #[test]
    fn pow10_values() {
        assert_eq!(pow10(0), BigInt::from(1));
        assert_eq!(pow10(18), BigInt::from(1_000_000_000_000_000_000u64));
    }
}
