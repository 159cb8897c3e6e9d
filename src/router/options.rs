//! Caller-supplied options for router and quoter calls.

use core::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::U256;

use crate::domain::{Percent, TokenAddress};
use crate::error::{Result, RouteError};

/// Default time-to-live of a swap transaction, in seconds.
pub const DEFAULT_DEADLINE_TTL: u64 = 1_200;

/// When a swap transaction expires.
///
/// # Examples
///
/// ```
/// use hydra_route::router::Deadline;
///
/// assert_eq!(Deadline::At(1_700_000_000).resolve_at(0), Ok(1_700_000_000));
/// assert_eq!(Deadline::Ttl(60).resolve_at(1_000), Ok(1_060));
/// assert!(Deadline::Ttl(0).resolve_at(1_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deadline {
    /// Absolute expiry in Unix seconds.
    At(u64),
    /// Seconds from now.
    Ttl(u64),
}

impl Deadline {
    /// Resolves to Unix seconds, reading the system clock for
    /// [`Deadline::Ttl`].
    ///
    /// # Errors
    ///
    /// Same as [`Deadline::resolve_at`], plus
    /// [`RouteError::InvalidArgument`]`("CLOCK")` if the system clock is
    /// before the Unix epoch.
    pub fn resolve(&self) -> Result<u64> {
        match self {
            Self::At(secs) => Ok(*secs),
            Self::Ttl(_) => {
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_err(|_| RouteError::InvalidArgument("CLOCK"))?;
                self.resolve_at(now.as_secs())
            }
        }
    }

    /// Resolves against a caller-supplied `now` in Unix seconds.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidArgument`]`("DEADLINE")` for a zero TTL.
    /// - [`RouteError::Overflow`]`("DEADLINE")` if `now + ttl` exceeds `u64`.
    pub const fn resolve_at(&self, now: u64) -> Result<u64> {
        match self {
            Self::At(secs) => Ok(*secs),
            Self::Ttl(0) => Err(RouteError::InvalidArgument("DEADLINE")),
            Self::Ttl(ttl) => match now.checked_add(*ttl) {
                Some(secs) => Ok(secs),
                None => Err(RouteError::Overflow("DEADLINE")),
            },
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::Ttl(DEFAULT_DEADLINE_TTL)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(secs) => write!(f, "At({secs})"),
            Self::Ttl(secs) => write!(f, "Ttl({secs}s)"),
        }
    }
}

/// Options shared by every call built by [`SwapRouter`](super::SwapRouter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOptions {
    slippage_tolerance: Percent,
    recipient: TokenAddress,
    deadline: Deadline,
    sqrt_price_limit_x96: Option<U256>,
}

impl SwapOptions {
    /// Creates options without a price limit.
    #[must_use]
    pub const fn new(
        slippage_tolerance: Percent,
        recipient: TokenAddress,
        deadline: Deadline,
    ) -> Self {
        Self {
            slippage_tolerance,
            recipient,
            deadline,
            sqrt_price_limit_x96: None,
        }
    }

    /// Sets a Q64.96 square-root price limit.  Only single-hop
    /// concentrated swaps accept one.
    #[must_use]
    pub fn with_sqrt_price_limit(mut self, limit: U256) -> Self {
        self.sqrt_price_limit_x96 = Some(limit);
        self
    }

    /// Returns the slippage tolerance.
    #[must_use]
    pub const fn slippage_tolerance(&self) -> &Percent {
        &self.slippage_tolerance
    }

    /// Returns the account receiving the output.
    #[must_use]
    pub const fn recipient(&self) -> &TokenAddress {
        &self.recipient
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Deadline {
        self.deadline
    }

    /// Returns the price limit, if any.
    #[must_use]
    pub const fn sqrt_price_limit_x96(&self) -> Option<U256> {
        self.sqrt_price_limit_x96
    }
}

/// Options for [`SwapQuoter`](super::SwapQuoter) calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteOptions {
    /// Account the simulated swap pays out to.
    pub recipient: Option<TokenAddress>,
    /// Q64.96 square-root price limit; single hop only.
    pub sqrt_price_limit_x96: Option<U256>,
}
