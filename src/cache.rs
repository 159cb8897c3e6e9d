//! Single-flight memoization of pool addresses.
//!
//! Pool addresses are derived on-chain from the sorted token pair (and fee
//! tier for concentrated pools), so resolving one means a view call or an
//! indexer lookup.  [`PoolAddressCache`] makes each key resolve at most
//! once: concurrent callers for the same key wait on one in-flight
//! resolution, successes are kept for the cache's lifetime, and failures
//! leave the key unresolved so the next caller retries.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::domain::TokenAddress;
use crate::error::{Result, RouteError};
use crate::pools::{Pair, PoolKey};
use crate::traits::SwapPool;

/// External source of pool addresses.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Looks up the on-chain address of the pool identified by `key`.
    async fn resolve(&self, key: &PoolKey) -> core::result::Result<TokenAddress, String>;
}

/// Memoizing wrapper around an [`AddressResolver`].
///
/// Safe to share across tasks behind an `Arc`.
pub struct PoolAddressCache<R> {
    resolver: R,
    entries: DashMap<PoolKey, Arc<OnceCell<TokenAddress>>>,
}

impl<R: AddressResolver> PoolAddressCache<R> {
    /// Creates an empty cache over `resolver`.
    #[must_use]
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            entries: DashMap::new(),
        }
    }

    /// Returns the address for `key`, resolving it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::AddressResolution`] with the resolver's
    /// message.  The failure is not cached.
    pub async fn resolve(&self, key: PoolKey) -> Result<TokenAddress> {
        let cell = Arc::clone(
            self.entries
                .entry(key)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .value(),
        );
        if let Some(address) = cell.get() {
            debug!(%key, "pool address cache hit");
            return Ok(*address);
        }

        let address = cell
            .get_or_try_init(|| async {
                debug!(%key, "pool address cache miss");
                self.resolver.resolve(&key).await.map_err(|message| {
                    warn!(%key, error = %message, "pool address resolution failed");
                    RouteError::AddressResolution(message)
                })
            })
            .await?;
        Ok(*address)
    }

    /// Resolves the address of `pool`.
    ///
    /// # Errors
    ///
    /// Same as [`PoolAddressCache::resolve`].
    pub async fn resolve_pool<P: SwapPool + Sync>(&self, pool: &P) -> Result<TokenAddress> {
        self.resolve(pool.pool_key()).await
    }

    /// Resolves `pair`'s address and attaches it, enabling
    /// [`Pair::liquidity_token`].
    ///
    /// # Errors
    ///
    /// Same as [`PoolAddressCache::resolve`].
    pub async fn attach_pair_address(&self, pair: Pair) -> Result<Pair> {
        let address = self.resolve(pair.pool_key()).await?;
        Ok(pair.with_address(address))
    }

    /// Returns the address for `key` if it has already been resolved.
    #[must_use]
    pub fn cached(&self, key: &PoolKey) -> Option<TokenAddress> {
        self.entries.get(key).and_then(|cell| cell.get().copied())
    }

    /// Number of resolved keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.value().initialized()).count()
    }

    /// Returns `true` if no key has been resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the wrapped resolver.
    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<R> core::fmt::Debug for PoolAddressCache<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PoolAddressCache")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
