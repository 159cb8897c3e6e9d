//! Unified error type for the routing engine.
//!
//! Every fallible operation in the crate returns [`RouteError`].  All
//! variants are deterministic, fail-fast conditions: the arithmetic is
//! pure, so nothing here is transient or worth retrying.  Only
//! [`RouteError::AddressResolution`] originates outside the crate, from
//! the resolver behind [`PoolAddressCache`](crate::cache::PoolAddressCache).

use thiserror::Error;

/// Errors raised by quoting, routing and encoding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A caller-supplied argument is outside its valid domain
    /// (negative slippage, zero significant digits, out-of-range tick,
    /// zero or oversized input to bit math, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Two values that must share a currency (or chain) do not.
    #[error("currency mismatch: {0}")]
    CurrencyMismatch(&'static str),

    /// A pool reserve is zero, or the requested output meets or exceeds
    /// what the pool can provide.
    #[error("insufficient reserves")]
    InsufficientReserves,

    /// The supplied input produces a zero output (or zero liquidity).
    #[error("insufficient input amount")]
    InsufficientInput,

    /// A route or aggregated trade is structurally invalid.
    #[error("invalid route: {0}")]
    RouteInvalid(&'static str),

    /// The requested combination is not supported by the on-chain router.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// A fixed-width bound (`U256`, `U160`, `u128`) was exceeded.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// The external pool-address resolver reported a failure.
    #[error("pool address resolution failed: {0}")]
    AddressResolution(String),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, RouteError>;
