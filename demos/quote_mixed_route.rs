//! Mixed-route quoting example.
//!
//! Demonstrates building a constant-product pair and two concentrated
//! pools from snapshots, quoting a trade split across a concentrated route
//! and a mixed route, and encoding the router calls.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=hydra_route=debug cargo run --example quote_mixed_route
//! ```

use hydra_route::config::{ConcentratedConfig, ConstantProductConfig, PoolConfig, RouterConfig};
use hydra_route::domain::{
    ChainId, CurrencyAmount, FeeAmount, Percent, Rounding, Tick, Token, TokenAddress, TradeType,
};
use hydra_route::factory::PoolFactory;
use hydra_route::math::Q96;
use hydra_route::registry::CurrencyRegistry;
use hydra_route::router::{Deadline, SwapOptions, SwapRouter};
use hydra_route::routing::{Route, Trade};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Mixed route quote ===\n");

    // ── 1. Currencies ───────────────────────────────────────────────────
    let registry = CurrencyRegistry::movement()?;
    let native = registry.native(ChainId::MAINNET)?.clone();
    let wmove = native.wrapped().clone();
    let usdc = Token::new(ChainId::MAINNET, TokenAddress::parse("0x1001")?, 6, "USDC");
    let weth = Token::new(ChainId::MAINNET, TokenAddress::parse("0x1002")?, 8, "WETH");

    // ── 2. Pool snapshots ───────────────────────────────────────────────
    //    Concentrated pools sit at price 1 with one full-range position.
    let liquidity: u128 = 50_000_000_000_000;
    let full_range = |fee: FeeAmount| -> Result<Vec<Tick>, Box<dyn std::error::Error>> {
        let spacing = fee.tick_spacing();
        let net = i128::try_from(liquidity)?;
        Ok(vec![
            Tick::new(-887_272 / spacing * spacing, liquidity, net)?,
            Tick::new(887_272 / spacing * spacing, liquidity, -net)?,
        ])
    };
    let configs = [
        PoolConfig::from(ConcentratedConfig::new(
            wmove.clone(),
            usdc.clone(),
            FeeAmount::Medium,
            Q96,
            liquidity,
            0,
            full_range(FeeAmount::Medium)?,
        )?),
        PoolConfig::from(ConcentratedConfig::new(
            wmove.clone(),
            weth.clone(),
            FeeAmount::Low,
            Q96,
            liquidity,
            0,
            full_range(FeeAmount::Low)?,
        )?),
        PoolConfig::from(ConstantProductConfig::new(
            weth.clone(),
            usdc.clone(),
            40_000_000_000_u64,
            40_000_000_000_u64,
        )?),
    ];
    let pools = PoolFactory::create_all(&configs)?;
    for config in &configs {
        println!("Pool: {config}");
    }

    // ── 3. Routes ───────────────────────────────────────────────────────
    let direct = Route::new(vec![pools[0].clone()], native.clone().into(), usdc.clone().into())?;
    let mixed = Route::new(
        vec![pools[1].clone(), pools[2].clone()],
        native.clone().into(),
        usdc.clone().into(),
    )?;
    println!("\nDirect route: {} hop(s), {}", direct.pools().len(), direct.protocol());
    println!("Mixed route:  {} hop(s), {}", mixed.pools().len(), mixed.protocol());

    // ── 4. Quote 70/30 split of 1 000 MOVE ──────────────────────────────
    let total = 100_000_000_000_u64;
    let trade = Trade::from_routes(
        [
            (direct, CurrencyAmount::from_raw_amount(native.clone().into(), total / 10 * 7)?),
            (mixed, CurrencyAmount::from_raw_amount(native.clone().into(), total / 10 * 3)?),
        ],
        TradeType::ExactInput,
    )?;
    let slippage = Percent::new(5, 1_000);
    println!("\nInput:            {} {}", trade.input_amount().to_exact(), native.symbol());
    println!("Output:           {} {}", trade.output_amount().to_exact(), usdc.symbol());
    println!(
        "Execution price:  {}",
        trade.execution_price().to_significant(6, Rounding::HalfUp)?
    );
    println!("Price impact:     {}%", trade.price_impact()?.to_fixed(2, Rounding::HalfUp)?);
    println!(
        "Minimum out:      {}",
        trade.minimum_amount_out(&slippage, None)?.to_exact()
    );

    // ── 5. Router calls ─────────────────────────────────────────────────
    let router = SwapRouter::new(RouterConfig::movement(ChainId::MAINNET)?);
    let options = SwapOptions::new(slippage, TokenAddress::parse("0xbeef")?, Deadline::default());
    let encoded = router.encode_swaps(&[trade], &options)?;
    println!("\nCalls:");
    for call in encoded.calls() {
        println!("  {}", call.method());
        for arg in call.args() {
            println!("    {arg}");
        }
    }
    println!("Partial-fill risk: {}", encoded.partial_fill_risk());

    Ok(())
}
