//! Integer square root.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::error::{Result, RouteError};

/// Computes `floor(sqrt(y))` by Newton's method.
///
/// # Errors
///
/// Returns [`RouteError::InvalidArgument`] if `y` is negative.
///
/// # Examples
///
/// ```
/// use hydra_route::math::sqrt;
/// use num_bigint::BigInt;
///
/// assert_eq!(sqrt(&BigInt::from(1_000_000)), Ok(BigInt::from(1_000)));
/// assert_eq!(sqrt(&BigInt::from(8)), Ok(BigInt::from(2)));
/// ```
pub fn sqrt(y: &BigInt) -> Result<BigInt> {
    if y.is_negative() {
        return Err(RouteError::InvalidArgument("NEGATIVE"));
    }
    let three = BigInt::from(3);
    if *y > three {
        let two = BigInt::from(2);
        let mut z = y.clone();
        let mut x: BigInt = y / &two + 1;
        while x < z {
            z = x.clone();
            x = (y / &x + &x) / &two;
        }
        Ok(z)
    } else if y.is_zero() {
        Ok(BigInt::zero())
    } else {
        Ok(BigInt::one())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn root(v: i64) -> BigInt {
        let Ok(r) = sqrt(&BigInt::from(v)) else {
            panic!("non-negative input");
        };
        r
    }

    #[test]
    fn small_values() {
        assert_eq!(root(0), BigInt::from(0));
        assert_eq!(root(1), BigInt::from(1));
        assert_eq!(root(2), BigInt::from(1));
        assert_eq!(root(3), BigInt::from(1));
        assert_eq!(root(4), BigInt::from(2));
        assert_eq!(root(5), BigInt::from(2));
    }

    #[test]
    fn floors_between_squares() {
        for n in 2..200i64 {
            assert_eq!(root(n * n), BigInt::from(n));
            assert_eq!(root(n * n - 1), BigInt::from(n - 1));
        }
    }

    #[test]
    fn large_value() {
        let big = BigInt::from(u128::MAX);
        let Ok(r) = sqrt(&big) else {
            panic!("non-negative input");
        };
        assert_eq!(r, BigInt::from(u64::MAX));
    }

    #[test]
    fn negative_fails() {
        assert_eq!(
            sqrt(&BigInt::from(-1)),
            Err(RouteError::InvalidArgument("NEGATIVE"))
        );
    }
}
