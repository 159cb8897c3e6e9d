//! Initialized tick of a concentrated-liquidity pool.

use core::fmt;

use crate::error::{Result, RouteError};
use crate::math::tick_math::{MAX_TICK, MIN_TICK};

/// A price boundary carrying the liquidity that activates or deactivates
/// when the pool price crosses it.
///
/// `liquidity_net` is added to the active liquidity when the price crosses
/// the tick moving up and subtracted when moving down.  `liquidity_gross`
/// is the total liquidity referencing the tick and only matters for
/// bookkeeping.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::Tick;
///
/// let tick = Tick::new(-60, 1_000, 1_000);
/// assert!(tick.is_ok());
/// assert!(Tick::new(887_273, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tick {
    index: i32,
    liquidity_gross: u128,
    liquidity_net: i128,
}

impl Tick {
    /// Creates a tick at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`] if `index` is outside
    /// `[-887272, 887272]`.
    pub const fn new(index: i32, liquidity_gross: u128, liquidity_net: i128) -> Result<Self> {
        if index < MIN_TICK || index > MAX_TICK {
            return Err(RouteError::InvalidArgument("TICK"));
        }
        Ok(Self {
            index,
            liquidity_gross,
            liquidity_net,
        })
    }

    /// Returns the tick index.
    #[must_use]
    pub const fn index(&self) -> i32 {
        self.index
    }

    /// Returns the gross liquidity referencing this tick.
    #[must_use]
    pub const fn liquidity_gross(&self) -> u128 {
        self.liquidity_gross
    }

    /// Returns the signed liquidity delta applied when crossing upward.
    #[must_use]
    pub const fn liquidity_net(&self) -> i128 {
        self.liquidity_net
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tick({}, net={})", self.index, self.liquidity_net)
    }
}
