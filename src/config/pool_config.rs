//! Top-level pool configuration enum.
//!
//! [`PoolConfig`] is the declarative snapshot for creating any pool model.
//! The factory matches on it to dispatch construction:
//!
//! ```text
//! match config {
//!     PoolConfig::ConstantProduct(cfg) => Pair::from_config(&cfg),
//!     PoolConfig::Concentrated(cfg)    => ConcentratedPool::from_config(&cfg),
//! }
//! ```

use super::{ConcentratedConfig, ConstantProductConfig};
use crate::error::Result;

/// Configuration for every supported pool model.
///
/// Call [`validate()`](PoolConfig::validate) to check all configuration
/// invariants before constructing a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolConfig {
    /// Constant-product pair snapshot.
    ConstantProduct(ConstantProductConfig),
    /// Concentrated-liquidity pool snapshot.
    Concentrated(ConcentratedConfig),
}

impl PoolConfig {
    /// Validates the inner configuration.
    ///
    /// # Errors
    ///
    /// Returns the same [`RouteError`](crate::error::RouteError) as the
    /// inner config's `validate()`.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::ConstantProduct(cfg) => cfg.validate(),
            Self::Concentrated(cfg) => cfg.validate(),
        }
    }

    /// Returns `true` if this is a [`ConstantProduct`](Self::ConstantProduct) variant.
    #[must_use]
    pub const fn is_constant_product(&self) -> bool {
        matches!(self, Self::ConstantProduct(_))
    }

    /// Returns `true` if this is a [`Concentrated`](Self::Concentrated) variant.
    #[must_use]
    pub const fn is_concentrated(&self) -> bool {
        matches!(self, Self::Concentrated(_))
    }
}

impl From<ConstantProductConfig> for PoolConfig {
    fn from(cfg: ConstantProductConfig) -> Self {
        Self::ConstantProduct(cfg)
    }
}

impl From<ConcentratedConfig> for PoolConfig {
    fn from(cfg: ConcentratedConfig) -> Self {
        Self::Concentrated(cfg)
    }
}

impl core::fmt::Display for PoolConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ConstantProduct(_) => write!(f, "ConstantProduct"),
            Self::Concentrated(cfg) => write!(f, "Concentrated({})", cfg.fee().value()),
        }
    }
}
