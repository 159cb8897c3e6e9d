//! Generic construction trait for building pools from snapshot configs.
//!
//! [`FromConfig`] gives every pool model a uniform constructor from its
//! configuration struct, so the [`PoolFactory`](crate::factory::PoolFactory)
//! can dispatch construction without `dyn` trait objects:
//!
//! ```text
//! PoolConfig::ConstantProduct(cfg) => Pair::from_config(&cfg)
//! PoolConfig::Concentrated(cfg)    => ConcentratedPool::from_config(&cfg)
//! ```
//!
//! # Validation Contract
//!
//! Implementations re-run every invariant the pool constructor checks.
//! A successfully constructed pool is ready to quote.
//!
//! There is no blanket implementation; each pool/config pairing is
//! explicit.

use crate::error::Result;

/// Builds a pool from a configuration snapshot.
///
/// # Implementors
///
/// - `impl FromConfig<ConstantProductConfig> for Pair`
/// - `impl FromConfig<ConcentratedConfig> for ConcentratedPool`
///
/// # Errors
///
/// Returns the same [`RouteError`](crate::error::RouteError) the pool's
/// own constructor would for an inconsistent snapshot.
pub trait FromConfig<C> {
    /// Creates a new pool from `config`.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn from_config(config: &C) -> Result<Self>
    where
        Self: Sized;
}
