//! Chain identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier of the chain a currency lives on.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::ChainId;
///
/// assert_eq!(ChainId::MAINNET.get(), 126);
/// assert_ne!(ChainId::MAINNET, ChainId::BARDOCK_TESTNET);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Movement mainnet.
    pub const MAINNET: Self = Self(126);

    /// Movement Bardock testnet.
    pub const BARDOCK_TESTNET: Self = Self(250);

    /// Wraps a raw chain id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw chain id.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
