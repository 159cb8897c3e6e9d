//! Integration tests exercising the full system from snapshot to router
//! call.
//!
//! These tests verify end-to-end flows through the public API: factory
//! construction, route validation, trade quoting with slippage, call
//! encoding and single-flight address resolution.

#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use num_bigint::BigInt;

use hydra_route::cache::{AddressResolver, PoolAddressCache};
use hydra_route::config::{ConcentratedConfig, ConstantProductConfig, PoolConfig, RouterConfig};
use hydra_route::domain::{
    ChainId, Currency, CurrencyAmount, FeeAmount, Percent, Rounding, Tick, Token, TokenAddress,
    TradeType,
};
use hydra_route::error::RouteError;
use hydra_route::factory::PoolFactory;
use hydra_route::math::tick_math::{MAX_TICK, MIN_TICK};
use hydra_route::math::Q96;
use hydra_route::pools::{Pool, PoolKey};
use hydra_route::registry::CurrencyRegistry;
use hydra_route::router::{
    CallArgument, Deadline, QuoteOptions, SwapOptions, SwapQuoter, SwapRouter,
};
use hydra_route::routing::{Protocol, Route, Trade};
use hydra_route::traits::SwapPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn addr(s: &str) -> TokenAddress {
    let Ok(a) = TokenAddress::parse(s) else {
        panic!("valid address");
    };
    a
}

fn token(s: &str, symbol: &str) -> Token {
    Token::new(ChainId::MAINNET, addr(s), 8, symbol)
}

fn registry() -> CurrencyRegistry {
    let Ok(r) = CurrencyRegistry::movement() else {
        panic!("preset");
    };
    r
}

fn native() -> Currency {
    let Ok(n) = registry().native(ChainId::MAINNET).cloned() else {
        panic!("registered");
    };
    n.into()
}

fn wrapped() -> Token {
    native().wrapped().clone()
}

fn cp_pool(a: &Token, b: &Token, ra: u64, rb: u64) -> Pool {
    let Ok(cfg) = ConstantProductConfig::new(a.clone(), b.clone(), ra, rb) else {
        panic!("valid config");
    };
    let Ok(pool) = PoolFactory::create(&PoolConfig::from(cfg)) else {
        panic!("pool created");
    };
    pool
}

fn cl_pool(a: &Token, b: &Token, fee: FeeAmount, liquidity: u128) -> Pool {
    let spacing = fee.tick_spacing();
    let net = i128::try_from(liquidity).unwrap_or(i128::MAX);
    let (Ok(lower), Ok(upper)) = (
        Tick::new(MIN_TICK / spacing * spacing, liquidity, net),
        Tick::new(MAX_TICK / spacing * spacing, liquidity, -net),
    ) else {
        panic!("ticks in range");
    };
    let ticks = vec![lower, upper];
    let Ok(cfg) = ConcentratedConfig::new(a.clone(), b.clone(), fee, Q96, liquidity, 0, ticks)
    else {
        panic!("valid config");
    };
    let Ok(pool) = PoolFactory::create(&PoolConfig::from(cfg)) else {
        panic!("pool created");
    };
    pool
}

fn route(pools: Vec<Pool>, input: Currency, output: Currency) -> Route {
    match Route::new(pools, input, output) {
        Ok(r) => r,
        Err(e) => panic!("valid route: {e}"),
    }
}

fn raw(currency: &Currency, value: u64) -> CurrencyAmount {
    let Ok(x) = CurrencyAmount::from_raw_amount(currency.clone(), value) else {
        panic!("in range");
    };
    x
}

fn router_config() -> RouterConfig {
    let Ok(cfg) = RouterConfig::movement(ChainId::MAINNET) else {
        panic!("preset");
    };
    cfg
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

#[test]
fn wrapped_round_trip_route_is_valid() {
    let a = token("0x1", "A");
    let b = token("0x2", "B");
    let w = wrapped();
    let r = route(
        vec![
            cp_pool(&a, &w, 1_000, 1_000),
            cp_pool(&a, &b, 1_000, 1_000),
            cp_pool(&b, &w, 1_000, 1_000),
        ],
        w.clone().into(),
        w.clone().into(),
    );
    assert_eq!(r.path(), &[w.clone(), a, b, w]);
    assert_eq!(r.protocol(), Protocol::ConstantProduct);
}

#[test]
fn native_input_route_uses_wrapped_pools() {
    let b = token("0x2", "B");
    let r = route(vec![cp_pool(&wrapped(), &b, 2_000, 1_000)], native(), b.into());
    let Ok(mid) = r.mid_price() else {
        panic!("mid price");
    };
    assert_eq!(mid.to_significant(2, Rounding::HalfUp).ok().as_deref(), Some("0.5"));
}

#[test]
fn routes_sharing_a_pool_are_rejected() {
    let a = token("0x1", "A");
    let b = token("0x2", "B");
    let c = token("0x3", "C");
    let shared = cp_pool(&a, &b, 1_000_000, 1_000_000);
    let direct = route(vec![shared.clone()], a.clone().into(), b.clone().into());
    let detour = route(
        vec![
            cp_pool(&a, &c, 1_000_000, 1_000_000),
            cl_pool(&c, &a, FeeAmount::Low, 1_000_000_000_000),
            shared,
        ],
        a.clone().into(),
        b.clone().into(),
    );
    let a_cur: Currency = a.into();
    let result = Trade::from_routes(
        [(direct, raw(&a_cur, 100)), (detour, raw(&a_cur, 100))],
        TradeType::ExactInput,
    );
    assert_eq!(result, Err(RouteError::RouteInvalid("POOLS_DUPLICATED")));
}

// ---------------------------------------------------------------------------
// Trades
// ---------------------------------------------------------------------------

#[test]
fn small_pair_quote_matches_contract() {
    let a = token("0x1", "A");
    let b = token("0x2", "B");
    let r = route(vec![cp_pool(&a, &b, 100, 101)], a.clone().into(), b.into());
    let Ok(trade) = Trade::from_route(r, &raw(&a.into(), 10), TradeType::ExactInput) else {
        panic!("quotes");
    };
    assert_eq!(trade.output_amount().quotient(), BigInt::from(9));
}

#[test]
fn half_percent_slippage_on_exact_input() {
    let a = token("0x1", "A");
    let b = token("0x2", "B");
    let r = route(vec![cp_pool(&a, &b, 1_000_000_000, 1_000_000_000)], a.clone().into(), b.into());
    let Ok(trade) = Trade::from_route(r, &raw(&a.into(), 1_000), TradeType::ExactInput) else {
        panic!("quotes");
    };
    let quoted = raw(trade.output_amount().currency(), 1_000);
    let Ok(min) = trade.minimum_amount_out(&Percent::new(5, 1_000), Some(&quoted)) else {
        panic!("valid slippage");
    };
    assert_eq!(min.quotient(), BigInt::from(995));
    assert!(trade
        .minimum_amount_out(&Percent::new(-1, 100), None)
        .is_err());
}

#[test]
fn split_trade_across_protocols() {
    let a = token("0x1", "A");
    let b = token("0x2", "B");
    let c = token("0x3", "C");
    let a_cur: Currency = a.clone().into();
    let via_pair = route(
        vec![cp_pool(&a, &b, 1_000_000_000, 1_000_000_000)],
        a_cur.clone(),
        b.clone().into(),
    );
    let mixed = route(
        vec![
            cl_pool(&a, &c, FeeAmount::Low, 1_000_000_000_000),
            cp_pool(&c, &b, 1_000_000_000, 1_000_000_000),
        ],
        a_cur.clone(),
        b.clone().into(),
    );
    assert_eq!(mixed.protocol(), Protocol::Mixed);
    let Ok(trade) = Trade::from_routes(
        [(via_pair, raw(&a_cur, 600_000)), (mixed, raw(&a_cur, 400_000))],
        TradeType::ExactInput,
    ) else {
        panic!("quotes");
    };
    assert_eq!(trade.input_amount().quotient(), BigInt::from(1_000_000));
    assert_eq!(trade.swaps().len(), 2);
    let Ok(impact) = trade.price_impact() else {
        panic!("impact");
    };
    assert!(!impact.is_negative());
    assert!(impact < &Percent::new(1, 100));
}

// ---------------------------------------------------------------------------
// Router and quoter
// ---------------------------------------------------------------------------

#[test]
fn factory_to_router_flow() {
    let a = token("0x1", "A");
    let b = token("0x2", "B");
    let c = token("0x3", "C");
    let a_cur: Currency = a.clone().into();
    let clamm = route(
        vec![
            cl_pool(&a, &c, FeeAmount::Medium, 1_000_000_000_000),
            cl_pool(&c, &b, FeeAmount::Medium, 1_000_000_000_000),
        ],
        a_cur.clone(),
        b.clone().into(),
    );
    let Ok(trade) = Trade::from_route(clamm.clone(), &raw(&a_cur, 50_000), TradeType::ExactInput)
    else {
        panic!("quotes");
    };

    let router = SwapRouter::new(router_config());
    let options = SwapOptions::new(Percent::new(5, 1_000), addr("0xbeef"), Deadline::Ttl(300));
    let Ok(encoded) = router.encode_swaps(std::slice::from_ref(&trade), &options) else {
        panic!("encodes");
    };
    let [call] = encoded.calls() else {
        panic!("one call");
    };
    assert_eq!(call.method(), "exact_input");
    assert!(call.function().starts_with(&router_config().clamm_address().to_string()));
    assert_eq!(call.args()[3], CallArgument::Amount(BigInt::from(50_000)));
    assert_eq!(
        encoded.minimum_amount_out(),
        &trade
            .minimum_amount_out(options.slippage_tolerance(), None)
            .unwrap_or_else(|e| panic!("{e}"))
    );
    assert!(!encoded.partial_fill_risk());

    let quoter = SwapQuoter::new(router_config());
    let Ok(quote) = quoter.quote_call_parameters(
        &clamm,
        &raw(&a_cur, 50_000),
        TradeType::ExactInput,
        &QuoteOptions::default(),
    ) else {
        panic!("quote call");
    };
    assert_eq!(quote.method(), "quote_exact_input");
    assert_eq!(quote.args()[0], call.args()[0]);
}

#[test]
fn native_exact_output_through_router() {
    let b = token("0x2", "B");
    let n = native();
    let r = route(vec![cp_pool(&wrapped(), &b, 5_000_000, 5_000_000)], n.clone(), b.clone().into());
    let Ok(trade) = Trade::from_route(r, &raw(&b.into(), 10_000), TradeType::ExactOutput) else {
        panic!("quotes");
    };
    let router = SwapRouter::new(router_config());
    let options = SwapOptions::new(Percent::new(1, 100), addr("0xbeef"), Deadline::At(42));
    let Ok(encoded) = router.encode_swaps(&[trade], &options) else {
        panic!("encodes");
    };
    assert!(encoded.input_is_native());
    assert_eq!(encoded.calls()[0].method(), "swap_move_for_exact_tokens");
    assert_eq!(encoded.total_amount_in().currency(), &n);
}

// ---------------------------------------------------------------------------
// Address cache
// ---------------------------------------------------------------------------

struct StaticResolver {
    calls: AtomicUsize,
}

#[async_trait]
impl AddressResolver for StaticResolver {
    async fn resolve(&self, key: &PoolKey) -> Result<TokenAddress, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        let mut bytes = key.token1().as_bytes();
        bytes[0] = 0xee;
        Ok(TokenAddress::from_bytes(bytes))
    }
}

#[tokio::test]
async fn cache_resolves_every_pool_of_a_route_once() {
    let a = token("0x1", "A");
    let b = token("0x2", "B");
    let c = token("0x3", "C");
    let r = route(
        vec![cp_pool(&a, &b, 1_000, 1_000), cl_pool(&b, &c, FeeAmount::High, 1_000_000)],
        a.into(),
        c.into(),
    );
    let cache = Arc::new(PoolAddressCache::new(StaticResolver {
        calls: AtomicUsize::new(0),
    }));

    let mut tasks = Vec::new();
    for _ in 0..4 {
        for pool in r.pools() {
            let cache = Arc::clone(&cache);
            let key = pool.pool_key();
            tasks.push(tokio::spawn(async move { cache.resolve(key).await }));
        }
    }
    for task in tasks {
        let Ok(Ok(_)) = task.await else {
            panic!("resolves");
        };
    }
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.resolver().calls.load(Ordering::SeqCst), 2);
    for pool in r.pools() {
        assert!(cache.cached(&pool.pool_key()).is_some());
    }
}
