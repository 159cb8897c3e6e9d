//! # Hydra Route
//!
//! Off-chain pricing and routing engine for DEX liquidity: exact quotes
//! through constant-product and concentrated-liquidity pools, multi-hop
//! route composition, slippage bounds and price impact, and byte-exact
//! arguments for the on-chain router entry functions.
//!
//! All integer arithmetic (truncating division, fee-scaled multiplication,
//! Q64.96 square-root price math, tick-indexed liquidity accounting)
//! reproduces the on-chain contracts exactly, so a quote computed here is
//! the amount the chain will produce against the same state.
//!
//! ## Quote a trade and build the router call
//!
//! ```rust
//! use hydra_route::config::{ConstantProductConfig, PoolConfig, RouterConfig};
//! use hydra_route::domain::{ChainId, CurrencyAmount, Percent, Token, TokenAddress, TradeType};
//! use hydra_route::factory::PoolFactory;
//! use hydra_route::router::{Deadline, SwapOptions, SwapRouter};
//! use hydra_route::routing::{Route, Trade};
//!
//! // 1. Two tokens and a reserve snapshot
//! let usdc = Token::new(ChainId::MAINNET, TokenAddress::parse("0x1").expect("ok"), 6, "USDC");
//! let weth = Token::new(ChainId::MAINNET, TokenAddress::parse("0x2").expect("ok"), 8, "WETH");
//! let config = PoolConfig::from(
//!     ConstantProductConfig::new(usdc.clone(), weth.clone(), 1_000_000, 1_000_000)
//!         .expect("valid config"),
//! );
//!
//! // 2. Build the pool and a one-hop route
//! let pool = PoolFactory::create(&config).expect("pool created");
//! let route = Route::new(vec![pool], usdc.clone().into(), weth.clone().into()).expect("valid route");
//!
//! // 3. Quote 10 000 USDC in
//! let amount = CurrencyAmount::from_raw_amount(usdc.into(), 10_000).expect("in range");
//! let trade = Trade::from_route(route, &amount, TradeType::ExactInput).expect("quoted");
//! assert_eq!(trade.output_amount().quotient(), 9_871.into());
//!
//! // 4. Encode the call with 0.5% slippage
//! let router = SwapRouter::new(RouterConfig::movement(ChainId::MAINNET).expect("preset"));
//! let recipient = TokenAddress::parse("0xbeef").expect("ok");
//! let options = SwapOptions::new(Percent::new(5, 1_000), recipient, Deadline::At(1_700_000_000));
//! let calls = router.swap_call_parameters(&[trade], &options).expect("encoded");
//! assert_eq!(calls[0].method(), "swap_exact_tokens_for_tokens");
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  PoolConfig snapshots + RouterConfig
//! └──────┬───────┘
//!        │ PoolFactory::create
//!        ▼
//! ┌──────────────┐
//! │    Pools      │  Pair, ConcentratedPool behind the Pool enum
//! └──────┬───────┘
//!        │ SwapPool::quote
//!        ▼
//! ┌──────────────┐
//! │   Routing     │  Route, Trade, path encoding
//! └──────┬───────┘
//!        │ Trade
//!        ▼
//! ┌──────────────┐
//! │    Router     │  SwapRouter, SwapQuoter → SwapCall
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Fractions, currencies, amounts, prices, ticks |
//! | [`math`] | Q64.96 fixed-point and tick math |
//! | [`pools`] | [`Pair`](pools::Pair), [`ConcentratedPool`](pools::ConcentratedPool), [`Pool`](pools::Pool) dispatch |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Pool snapshots and [`RouterConfig`](config::RouterConfig) |
//! | [`factory`] | [`PoolFactory`](factory::PoolFactory) |
//! | [`routing`] | [`Route`](routing::Route), [`Trade`](routing::Trade), path encoding |
//! | [`router`] | [`SwapRouter`](router::SwapRouter), [`SwapQuoter`](router::SwapQuoter) |
//! | [`registry`] | [`CurrencyRegistry`](registry::CurrencyRegistry) of native currencies |
//! | [`cache`] | [`PoolAddressCache`](cache::PoolAddressCache) single-flight resolution |
//! | [`error`] | [`RouteError`](error::RouteError) |
//! | [`prelude`] | Convenience re-exports |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (`debug` for quotes, calls and cache
//! hits, `trace` for per-hop and per-step detail, `warn` for resolver
//! failures) and never installs a subscriber.

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod router;
pub mod routing;
pub mod traits;
