//! On-chain module addresses the router and quoter target.

use serde::{Deserialize, Serialize};

use crate::domain::{ChainId, TokenAddress};
use crate::error::Result;

const AMM_ROUTER_MODULE: &str = "amm_router";
const CLAMM_ROUTER_MODULE: &str = "clamm_router";
const CLAMM_QUOTER_MODULE: &str = "router";

const MOVEMENT_AMM_ADDRESS: &str =
    "0xc4e68f29fa608d2630d11513c8de731b09a975f2f75ea945160491b9bfd36992";
const MOVEMENT_CLAMM_ADDRESS: &str =
    "0x3b8d53bb8a6dc02a3ae90f993b2af02f5eb25ab2b27b85806de62457ed4901f0";

/// Chain id and module addresses for building entry-function targets.
///
/// Deserializable from any serde format; module names default to the
/// deployed ones when omitted.
///
/// ```
/// use hydra_route::config::RouterConfig;
/// use hydra_route::domain::ChainId;
///
/// let cfg = RouterConfig::movement(ChainId::MAINNET).expect("preset parses");
/// assert!(cfg.amm_function("swap_exact_tokens_for_tokens").ends_with(
///     "::amm_router::swap_exact_tokens_for_tokens"
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    chain_id: ChainId,
    amm_address: TokenAddress,
    clamm_address: TokenAddress,
    #[serde(default = "default_amm_router_module")]
    amm_router_module: String,
    #[serde(default = "default_clamm_router_module")]
    clamm_router_module: String,
    #[serde(default = "default_clamm_quoter_module")]
    clamm_quoter_module: String,
}

fn default_amm_router_module() -> String {
    AMM_ROUTER_MODULE.to_owned()
}

fn default_clamm_router_module() -> String {
    CLAMM_ROUTER_MODULE.to_owned()
}

fn default_clamm_quoter_module() -> String {
    CLAMM_QUOTER_MODULE.to_owned()
}

impl RouterConfig {
    /// Creates a config with the default module names.
    #[must_use]
    pub fn new(chain_id: ChainId, amm_address: TokenAddress, clamm_address: TokenAddress) -> Self {
        Self {
            chain_id,
            amm_address,
            clamm_address,
            amm_router_module: default_amm_router_module(),
            clamm_router_module: default_clamm_router_module(),
            clamm_quoter_module: default_clamm_quoter_module(),
        }
    }

    /// The Movement deployment.  Mainnet and Bardock share module
    /// addresses.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in addresses; the `Result` carries the
    /// address parser's signature.
    pub fn movement(chain_id: ChainId) -> Result<Self> {
        Ok(Self::new(
            chain_id,
            TokenAddress::parse(MOVEMENT_AMM_ADDRESS)?,
            TokenAddress::parse(MOVEMENT_CLAMM_ADDRESS)?,
        ))
    }

    /// Returns the chain id.
    #[must_use]
    pub const fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Returns the constant-product module address.
    #[must_use]
    pub const fn amm_address(&self) -> &TokenAddress {
        &self.amm_address
    }

    /// Returns the concentrated-liquidity module address.
    #[must_use]
    pub const fn clamm_address(&self) -> &TokenAddress {
        &self.clamm_address
    }

    /// `{amm_address}::{amm_router_module}::{method}`
    #[must_use]
    pub fn amm_function(&self, method: &str) -> String {
        format!("{}::{}::{method}", self.amm_address, self.amm_router_module)
    }

    /// `{clamm_address}::{clamm_router_module}::{method}`
    #[must_use]
    pub fn clamm_function(&self, method: &str) -> String {
        format!("{}::{}::{method}", self.clamm_address, self.clamm_router_module)
    }

    /// `{clamm_address}::{clamm_quoter_module}::{method}`
    #[must_use]
    pub fn quoter_function(&self, method: &str) -> String {
        format!("{}::{}::{method}", self.clamm_address, self.clamm_quoter_module)
    }
}
