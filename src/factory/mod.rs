//! Pool instantiation via the factory pattern.
//!
//! The [`PoolFactory`] creates [`Pool`](crate::pools::Pool) values from
//! [`PoolConfig`](crate::config::PoolConfig) snapshots, validating the
//! configuration and dispatching to the matching
//! [`FromConfig`](crate::traits::FromConfig) implementation.
//!
//! # Usage
//!
//! ```rust
//! use hydra_route::config::{ConstantProductConfig, PoolConfig};
//! use hydra_route::domain::{ChainId, Token, TokenAddress};
//! use hydra_route::factory::PoolFactory;
//! use hydra_route::traits::SwapPool;
//!
//! let a = Token::new(ChainId::MAINNET, TokenAddress::parse("0x1").expect("ok"), 6, "A");
//! let b = Token::new(ChainId::MAINNET, TokenAddress::parse("0x2").expect("ok"), 8, "B");
//! let cfg = ConstantProductConfig::new(a.clone(), b, 1_000_000, 2_000_000).expect("valid");
//!
//! let pool = PoolFactory::create(&PoolConfig::ConstantProduct(cfg)).expect("pool created");
//! assert!(pool.is_constant_product());
//! assert_eq!(pool.token0(), &a);
//! ```

mod pool_factory;

pub use pool_factory::PoolFactory;
