//! Signed liquidity updates.

use crate::error::{Result, RouteError};

/// Applies a signed `delta` to the active liquidity `x`.
///
/// # Errors
///
/// Returns [`RouteError::Overflow`] if the result is negative or exceeds
/// `u128::MAX`.
///
/// # Examples
///
/// ```
/// use hydra_route::math::liquidity_math::add_delta;
///
/// assert_eq!(add_delta(100, -20), Ok(80));
/// assert!(add_delta(0, -1).is_err());
/// ```
pub fn add_delta(x: u128, delta: i128) -> Result<u128> {
    if delta < 0 {
        x.checked_sub(delta.unsigned_abs())
            .ok_or(RouteError::Overflow("liquidity underflow"))
    } else {
        x.checked_add(delta.unsigned_abs())
            .ok_or(RouteError::Overflow("liquidity overflow"))
    }
}
