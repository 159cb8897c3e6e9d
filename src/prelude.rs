//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_route::prelude::*;
//! ```

pub use crate::domain::{
    ChainId, Currency, CurrencyAmount, FeeAmount, Fraction, NativeCurrency, Percent, Price,
    Rounding, Tick, Token, TokenAddress, TradeType,
};

pub use crate::traits::{FromConfig, SwapPool};

pub use crate::config::{ConcentratedConfig, ConstantProductConfig, PoolConfig, RouterConfig};

pub use crate::error::{Result, RouteError};

pub use crate::factory::PoolFactory;

pub use crate::pools::{ConcentratedPool, Pair, Pool, PoolKey};

pub use crate::routing::{Protocol, Route, RouteSwap, Trade};

pub use crate::router::{Deadline, EncodedSwaps, SwapCall, SwapOptions, SwapQuoter, SwapRouter};

pub use crate::cache::{AddressResolver, PoolAddressCache};

pub use crate::registry::CurrencyRegistry;
