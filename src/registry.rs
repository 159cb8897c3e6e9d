//! Native currencies keyed by chain.

use std::collections::HashMap;

use crate::domain::{ChainId, NativeCurrency, Token, TokenAddress};
use crate::error::{Result, RouteError};

const MOVE_DECIMALS: u8 = 8;
const MOVE_WRAPPED_ADDRESS: &str = "0xa";

/// Lookup table from chain to its native currency and wrapped token.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::ChainId;
/// use hydra_route::registry::CurrencyRegistry;
///
/// let registry = CurrencyRegistry::movement().expect("preset");
/// let native = registry.native(ChainId::MAINNET).expect("registered");
/// assert_eq!(native.symbol(), "MOVE");
/// assert!(registry.native(ChainId::new(1)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    natives: HashMap<ChainId, NativeCurrency>,
}

impl CurrencyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// MOVE on Movement mainnet and the Bardock testnet.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in address; the `Result` carries the
    /// address parser's signature.
    pub fn movement() -> Result<Self> {
        let wrapped_address = TokenAddress::parse(MOVE_WRAPPED_ADDRESS)?;
        let mut registry = Self::new();
        for chain_id in [ChainId::MAINNET, ChainId::BARDOCK_TESTNET] {
            let wrapped = Token::new(chain_id, wrapped_address, MOVE_DECIMALS, "MOVE")
                .with_name("Move Coin");
            registry.register(NativeCurrency::new(
                chain_id,
                MOVE_DECIMALS,
                "MOVE",
                "Move",
                wrapped,
            ));
        }
        Ok(registry)
    }

    /// Registers `native` for its chain, returning the currency it
    /// replaces.
    pub fn register(&mut self, native: NativeCurrency) -> Option<NativeCurrency> {
        self.natives.insert(native.chain_id(), native)
    }

    /// Returns the native currency of `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`]`("CHAIN_ID")` if the chain
    /// is not registered.
    pub fn native(&self, chain_id: ChainId) -> Result<&NativeCurrency> {
        self.natives
            .get(&chain_id)
            .ok_or(RouteError::InvalidArgument("CHAIN_ID"))
    }

    /// Returns the wrapped native token of `chain_id`.
    ///
    /// # Errors
    ///
    /// Same as [`CurrencyRegistry::native`].
    pub fn wrapped_native(&self, chain_id: ChainId) -> Result<&Token> {
        Ok(self.native(chain_id)?.wrapped())
    }

    /// Returns `true` if `chain_id` is registered.
    #[must_use]
    pub fn contains(&self, chain_id: ChainId) -> bool {
        self.natives.contains_key(&chain_id)
    }

    /// Number of registered chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.natives.len()
    }

    /// Returns `true` if no chain is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.natives.is_empty()
    }
}
