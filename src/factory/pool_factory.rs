//! Default pool factory implementation.

use tracing::debug;

use crate::config::PoolConfig;
use crate::error::Result;
use crate::pools::{ConcentratedPool, Pair, Pool};
use crate::traits::{FromConfig, SwapPool};

/// Stateless factory for creating pools from configuration snapshots.
///
/// [`create`](Self::create) is a pure function with no shared mutable
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolFactory;

impl PoolFactory {
    /// Creates a pool from `config`.
    ///
    /// # Flow
    ///
    /// 1. Validate the configuration via [`PoolConfig::validate`].
    /// 2. Match on the config variant.
    /// 3. Delegate to the pool's [`FromConfig`] implementation.
    /// 4. Wrap the constructed pool in the corresponding [`Pool`] variant.
    ///
    /// # Errors
    ///
    /// Any error from validation or from the pool constructor.
    pub fn create(config: &PoolConfig) -> Result<Pool> {
        config.validate()?;

        let pool = match config {
            PoolConfig::ConstantProduct(cfg) => Pool::ConstantProduct(Pair::from_config(cfg)?),
            PoolConfig::Concentrated(cfg) => {
                Pool::Concentrated(ConcentratedPool::from_config(cfg)?)
            }
        };
        debug!(key = %pool.pool_key(), kind = %config, "pool created");
        Ok(pool)
    }

    /// Creates one pool per config, failing on the first invalid snapshot.
    ///
    /// # Errors
    ///
    /// The first error [`create`](Self::create) reports.
    pub fn create_all<'a, I>(configs: I) -> Result<Vec<Pool>>
    where
        I: IntoIterator<Item = &'a PoolConfig>,
    {
        configs.into_iter().map(Self::create).collect()
    }
}
