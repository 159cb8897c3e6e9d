//! Highest-set-bit search.

use alloy_primitives::U256;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::{to_u256, MAX_U256};
use crate::error::{Result, RouteError};

const PROBES: [usize; 8] = [128, 64, 32, 16, 8, 4, 2, 1];

/// Returns the 0-based index of the highest set bit of `x`.
///
/// Uses a descending binary search over fixed power-of-two probes, the way
/// the on-chain contract does.
///
/// # Errors
///
/// - [`RouteError::InvalidArgument`]`("ZERO")` if `x <= 0`.
/// - [`RouteError::InvalidArgument`]`("MAX")` if `x > 2^256 - 1`.
///
/// # Examples
///
/// ```
/// use hydra_route::math::most_significant_bit;
/// use num_bigint::BigInt;
///
/// assert_eq!(most_significant_bit(&BigInt::from(1)), Ok(0));
/// assert_eq!(most_significant_bit(&BigInt::from(255)), Ok(7));
/// assert!(most_significant_bit(&BigInt::from(0)).is_err());
/// ```
pub fn most_significant_bit(x: &BigInt) -> Result<u8> {
    if x.is_zero() || x.is_negative() {
        return Err(RouteError::InvalidArgument("ZERO"));
    }
    if *x > *MAX_U256 {
        return Err(RouteError::InvalidArgument("MAX"));
    }
    Ok(msb_u256(to_u256(x)?))
}

/// Probe search on a non-zero `U256`.  Returns 0 for 0.
pub(crate) fn msb_u256(mut x: U256) -> u8 {
    let mut msb = 0u8;
    for power in PROBES {
        if x >= U256::ONE << power {
            x >>= power;
            msb += power as u8;
        }
    }
    msb
}
