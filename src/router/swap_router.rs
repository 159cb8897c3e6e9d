//! Call parameters for the constant-product and concentrated-liquidity
//! routers.
//!
//! Every trade is unbundled into its route swaps, and each swap becomes
//! one or more calls:
//!
//! | Route protocol    | Calls                                                        |
//! |-------------------|--------------------------------------------------------------|
//! | `ConstantProduct` | one `swap_*` call on the constant-product router            |
//! | `Concentrated`    | `exact_{input,output}_single` or `exact_{input,output}`     |
//! | `Mixed`           | one call per run of same-protocol pools, exact input only   |
//!
//! When an exact-input batch has more than two swaps, per-swap minimum
//! outputs are zeroed and the caller checks the aggregated
//! [`EncodedSwaps::minimum_amount_out`] instead.

use num_bigint::BigInt;
use tracing::{debug, trace};

use super::{CallArgument, SwapCall, SwapOptions};
use crate::config::RouterConfig;
use crate::domain::{CurrencyAmount, Percent, TokenAddress, TradeType};
use crate::error::{Result, RouteError};
use crate::routing::{
    encode_mixed_route_to_path, encode_route_to_path, Protocol, Route, RouteSwap, Trade,
};

/// Price impact above which a concentrated or mixed trade may hit a
/// price bound and fill partially.
const PARTIAL_FILL_PRICE_IMPACT: (u32, u32) = (50, 100);

/// Calls and totals for a batch of trades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSwaps {
    calls: Vec<SwapCall>,
    input_is_native: bool,
    output_is_native: bool,
    total_amount_in: CurrencyAmount,
    minimum_amount_out: CurrencyAmount,
    quote_amount_out: CurrencyAmount,
    partial_fill_risk: bool,
}

impl EncodedSwaps {
    /// Returns the calls in execution order.
    #[must_use]
    pub fn calls(&self) -> &[SwapCall] {
        &self.calls
    }

    /// Consumes the summary, returning the calls.
    #[must_use]
    pub fn into_calls(self) -> Vec<SwapCall> {
        self.calls
    }

    /// Returns `true` if the input currency is native.
    #[must_use]
    pub const fn input_is_native(&self) -> bool {
        self.input_is_native
    }

    /// Returns `true` if the output currency is native.
    #[must_use]
    pub const fn output_is_native(&self) -> bool {
        self.output_is_native
    }

    /// Sum of the maximum inputs under the slippage tolerance.
    #[must_use]
    pub const fn total_amount_in(&self) -> &CurrencyAmount {
        &self.total_amount_in
    }

    /// Sum of the minimum outputs under the slippage tolerance.
    #[must_use]
    pub const fn minimum_amount_out(&self) -> &CurrencyAmount {
        &self.minimum_amount_out
    }

    /// Sum of the quoted outputs.
    #[must_use]
    pub const fn quote_amount_out(&self) -> &CurrencyAmount {
        &self.quote_amount_out
    }

    /// Returns `true` if a non-constant-product trade has a price impact
    /// above 50%.
    #[must_use]
    pub const fn partial_fill_risk(&self) -> bool {
        self.partial_fill_risk
    }
}

/// Resolved per-call inputs shared by every swap of a batch.
struct CallContext<'a> {
    config: &'a RouterConfig,
    recipient: TokenAddress,
    deadline: u64,
    sqrt_price_limit: Option<CallArgument>,
    aggregated: bool,
}

impl CallContext<'_> {
    fn min_out(&self, amount_out: &BigInt) -> CallArgument {
        if self.aggregated {
            CallArgument::amount(0)
        } else {
            CallArgument::Amount(amount_out.clone())
        }
    }

    fn price_limit(&self) -> CallArgument {
        self.sqrt_price_limit
            .clone()
            .unwrap_or(CallArgument::SqrtPriceLimit(alloy_primitives::U256::ZERO))
    }
}

/// Builds entry-function calls for the deployed routers.
///
/// # Examples
///
/// ```
/// use hydra_route::config::RouterConfig;
/// use hydra_route::domain::ChainId;
/// use hydra_route::router::SwapRouter;
///
/// let router = SwapRouter::new(RouterConfig::movement(ChainId::MAINNET).expect("preset"));
/// assert_eq!(router.config().chain_id(), ChainId::MAINNET);
/// ```
#[derive(Debug, Clone)]
pub struct SwapRouter {
    config: RouterConfig,
}

impl SwapRouter {
    /// Creates a router targeting the modules in `config`.
    #[must_use]
    pub const fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Returns the router configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Returns only the calls for `trades`.
    ///
    /// # Errors
    ///
    /// Same as [`SwapRouter::encode_swaps`].
    pub fn swap_call_parameters(
        &self,
        trades: &[Trade],
        options: &SwapOptions,
    ) -> Result<Vec<SwapCall>> {
        Ok(self.encode_swaps(trades, options)?.into_calls())
    }

    /// Encodes every swap of every trade and totals the amounts.
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidArgument`]`("TRADES")` if `trades` is empty.
    /// - [`RouteError::CurrencyMismatch`]`("TOKEN_IN_DIFF")` /
    ///   `("TOKEN_OUT_DIFF")` if trades disagree on input / output currency.
    /// - [`RouteError::UnsupportedOperation`]`("TRADE_TYPE_DIFF")` if trades
    ///   disagree on direction.
    /// - [`RouteError::UnsupportedOperation`]`("MOVE_IN_OUT")` for a
    ///   constant-product swap with native currency on both sides.
    /// - [`RouteError::UnsupportedOperation`]`("TRADE_TYPE")` for an
    ///   exact-output mixed route.
    /// - [`RouteError::RouteInvalid`]`("MULTIHOP_PRICE_LIMIT")` if a price
    ///   limit is set for a multi-hop concentrated route.
    /// - Deadline and slippage errors.
    pub fn encode_swaps(&self, trades: &[Trade], options: &SwapOptions) -> Result<EncodedSwaps> {
        let Some(sample) = trades.first() else {
            return Err(RouteError::InvalidArgument("TRADES"));
        };
        let input_currency = sample.input_amount().currency();
        let output_currency = sample.output_amount().currency();
        let trade_type = sample.trade_type();
        for trade in trades {
            if trade.input_amount().currency() != input_currency {
                return Err(RouteError::CurrencyMismatch("TOKEN_IN_DIFF"));
            }
            if trade.output_amount().currency() != output_currency {
                return Err(RouteError::CurrencyMismatch("TOKEN_OUT_DIFF"));
            }
            if trade.trade_type() != trade_type {
                return Err(RouteError::UnsupportedOperation("TRADE_TYPE_DIFF"));
            }
        }

        let swap_count: usize = trades.iter().map(|t| t.swaps().len()).sum();
        let ctx = CallContext {
            config: &self.config,
            recipient: *options.recipient(),
            deadline: options.deadline().resolve()?,
            sqrt_price_limit: options.sqrt_price_limit_x96().map(CallArgument::SqrtPriceLimit),
            aggregated: trade_type == TradeType::ExactInput && swap_count > 2,
        };
        let slippage = options.slippage_tolerance();

        let mut calls = Vec::with_capacity(swap_count);
        let mut total_amount_in = CurrencyAmount::from_raw_amount(input_currency.clone(), 0)?;
        let mut minimum_amount_out = CurrencyAmount::from_raw_amount(output_currency.clone(), 0)?;
        let mut quote_amount_out = CurrencyAmount::from_raw_amount(output_currency.clone(), 0)?;
        for trade in trades {
            for swap in trade.swaps() {
                let max_in = trade.maximum_amount_in(slippage, Some(swap.input_amount()))?;
                let min_out = trade.minimum_amount_out(slippage, Some(swap.output_amount()))?;
                let amount_in = max_in.quotient();
                let amount_out = min_out.quotient();
                match swap.route().protocol() {
                    Protocol::ConstantProduct => {
                        calls.push(encode_constant_product(
                            &ctx,
                            swap,
                            trade_type,
                            &amount_in,
                            &amount_out,
                        )?);
                    }
                    Protocol::Concentrated => {
                        calls.push(encode_concentrated(
                            &ctx,
                            swap.route(),
                            trade_type,
                            &amount_in,
                            &amount_out,
                        )?);
                    }
                    Protocol::Mixed => {
                        calls.extend(encode_mixed(
                            &ctx,
                            swap.route(),
                            trade_type,
                            &amount_in,
                            &amount_out,
                        )?);
                    }
                }
                total_amount_in = total_amount_in.add(&max_in)?;
                minimum_amount_out = minimum_amount_out.add(&min_out)?;
                quote_amount_out = quote_amount_out.add(swap.output_amount())?;
            }
        }

        let partial_fill_risk = risk_of_partial_fill(trades)?;
        debug!(
            trades = trades.len(),
            swaps = swap_count,
            calls = calls.len(),
            aggregated = ctx.aggregated,
            %trade_type,
            "encoded swap calls"
        );
        Ok(EncodedSwaps {
            calls,
            input_is_native: input_currency.is_native(),
            output_is_native: output_currency.is_native(),
            total_amount_in,
            minimum_amount_out,
            quote_amount_out,
            partial_fill_risk,
        })
    }
}

fn token_path(route: &Route) -> Vec<TokenAddress> {
    route.path().iter().map(|token| *token.address()).collect()
}

fn encode_constant_product(
    ctx: &CallContext<'_>,
    swap: &RouteSwap,
    trade_type: TradeType,
    amount_in: &BigInt,
    amount_out: &BigInt,
) -> Result<SwapCall> {
    let native_in = swap.route().input().is_native();
    let native_out = swap.route().output().is_native();
    if native_in && native_out {
        return Err(RouteError::UnsupportedOperation("MOVE_IN_OUT"));
    }

    let path = CallArgument::Addresses(token_path(swap.route()));
    let recipient = CallArgument::Address(ctx.recipient);
    let deadline = CallArgument::Deadline(ctx.deadline);
    let (method, args) = match trade_type {
        TradeType::ExactInput => {
            let method = if native_in {
                "swap_exact_move_for_tokens"
            } else if native_out {
                "swap_exact_tokens_for_move"
            } else {
                "swap_exact_tokens_for_tokens"
            };
            let args = vec![
                CallArgument::Amount(amount_in.clone()),
                ctx.min_out(amount_out),
                path,
                recipient,
                deadline,
            ];
            (method, args)
        }
        TradeType::ExactOutput if native_in => (
            "swap_move_for_exact_tokens",
            vec![
                CallArgument::Amount(amount_in.clone()),
                CallArgument::Amount(amount_out.clone()),
                path,
                recipient,
                deadline,
            ],
        ),
        TradeType::ExactOutput => {
            let method = if native_out {
                "swap_tokens_for_exact_move"
            } else {
                "swap_tokens_for_exact_tokens"
            };
            let args = vec![
                CallArgument::Amount(amount_out.clone()),
                CallArgument::Amount(amount_in.clone()),
                path,
                recipient,
                deadline,
            ];
            (method, args)
        }
    };
    trace!(method, hops = swap.route().pools().len(), "constant-product call");
    Ok(SwapCall::new(ctx.config.amm_function(method), args))
}

fn fee_of_first_hop(route: &Route) -> Result<u32> {
    route
        .pools()
        .first()
        .and_then(|pool| pool.as_concentrated())
        .map(|pool| pool.fee().value())
        .ok_or(RouteError::RouteInvalid("PROTOCOL"))
}

fn exact_input_single(
    ctx: &CallContext<'_>,
    route: &Route,
    amount_in: &BigInt,
    amount_out: &BigInt,
) -> Result<SwapCall> {
    let path = route.path();
    let args = vec![
        CallArgument::Address(*path[0].address()),
        CallArgument::Address(*path[1].address()),
        CallArgument::Fee(fee_of_first_hop(route)?),
        CallArgument::Address(ctx.recipient),
        CallArgument::Deadline(ctx.deadline),
        CallArgument::Amount(amount_in.clone()),
        ctx.min_out(amount_out),
        ctx.price_limit(),
    ];
    Ok(SwapCall::new(ctx.config.clamm_function("exact_input_single"), args))
}

fn encode_concentrated(
    ctx: &CallContext<'_>,
    route: &Route,
    trade_type: TradeType,
    amount_in: &BigInt,
    amount_out: &BigInt,
) -> Result<SwapCall> {
    if route.is_single_hop() {
        return match trade_type {
            TradeType::ExactInput => exact_input_single(ctx, route, amount_in, amount_out),
            TradeType::ExactOutput => {
                let path = route.path();
                let args = vec![
                    CallArgument::Address(*path[0].address()),
                    CallArgument::Address(*path[1].address()),
                    CallArgument::Fee(fee_of_first_hop(route)?),
                    CallArgument::Address(ctx.recipient),
                    CallArgument::Deadline(ctx.deadline),
                    CallArgument::Amount(amount_out.clone()),
                    CallArgument::Amount(amount_in.clone()),
                    ctx.price_limit(),
                ];
                Ok(SwapCall::new(ctx.config.clamm_function("exact_output_single"), args))
            }
        };
    }

    if ctx.sqrt_price_limit.is_some() {
        return Err(RouteError::RouteInvalid("MULTIHOP_PRICE_LIMIT"));
    }
    let exact_output = trade_type == TradeType::ExactOutput;
    let path = CallArgument::Bytes(encode_route_to_path(route, exact_output)?);
    let recipient = CallArgument::Address(ctx.recipient);
    let deadline = CallArgument::Deadline(ctx.deadline);
    let call = if exact_output {
        SwapCall::new(
            ctx.config.clamm_function("exact_output"),
            vec![
                path,
                recipient,
                deadline,
                CallArgument::Amount(amount_out.clone()),
                CallArgument::Amount(amount_in.clone()),
            ],
        )
    } else {
        SwapCall::new(
            ctx.config.clamm_function("exact_input"),
            vec![
                path,
                recipient,
                deadline,
                CallArgument::Amount(amount_in.clone()),
                ctx.min_out(amount_out),
            ],
        )
    };
    trace!(method = call.method(), hops = route.pools().len(), "concentrated call");
    Ok(call)
}

/// Splits a route into maximal runs of pools sharing a model, returned
/// as sub-routes between wrapped tokens.
fn partition_by_protocol(route: &Route) -> Result<Vec<Route>> {
    let pools = route.pools();
    let path = route.path();
    let mut sections = Vec::new();
    let mut start = 0;
    for end in 1..=pools.len() {
        let boundary =
            end == pools.len() || pools[end].is_concentrated() != pools[start].is_concentrated();
        if boundary {
            sections.push(Route::new(
                pools[start..end].to_vec(),
                path[start].clone().into(),
                path[end].clone().into(),
            )?);
            start = end;
        }
    }
    Ok(sections)
}

fn encode_mixed(
    ctx: &CallContext<'_>,
    route: &Route,
    trade_type: TradeType,
    amount_in: &BigInt,
    amount_out: &BigInt,
) -> Result<Vec<SwapCall>> {
    if trade_type != TradeType::ExactInput {
        return Err(RouteError::UnsupportedOperation("TRADE_TYPE"));
    }

    let sections = partition_by_protocol(route)?;
    let last = sections.len() - 1;
    let mut calls = Vec::with_capacity(sections.len());
    for (i, section) in sections.iter().enumerate() {
        let section_in = if i == 0 {
            CallArgument::Amount(amount_in.clone())
        } else {
            CallArgument::amount(0)
        };
        let section_out = if i == last {
            CallArgument::Amount(amount_out.clone())
        } else {
            CallArgument::amount(0)
        };
        let call = if section.protocol() == Protocol::Concentrated {
            SwapCall::new(
                ctx.config.clamm_function("exact_input"),
                vec![
                    CallArgument::Bytes(encode_mixed_route_to_path(section)),
                    CallArgument::Address(ctx.recipient),
                    CallArgument::Deadline(ctx.deadline),
                    section_in,
                    section_out,
                ],
            )
        } else {
            SwapCall::new(
                ctx.config.amm_function("swap_exact_tokens_for_tokens"),
                vec![
                    section_in,
                    section_out,
                    CallArgument::Addresses(token_path(section)),
                    CallArgument::Address(ctx.recipient),
                    CallArgument::Deadline(ctx.deadline),
                ],
            )
        };
        trace!(
            section = i,
            method = call.method(),
            hops = section.pools().len(),
            "mixed section call"
        );
        calls.push(call);
    }
    Ok(calls)
}

fn risk_of_partial_fill(trades: &[Trade]) -> Result<bool> {
    let (num, den) = PARTIAL_FILL_PRICE_IMPACT;
    let threshold = Percent::new(num, den);
    for trade in trades {
        let constant_product_only = trade
            .routes()
            .all(|route| route.protocol() == Protocol::ConstantProduct);
        if !constant_product_only && trade.price_impact()? > &threshold {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::router::{Deadline, DEFAULT_DEADLINE_TTL};
    use crate::domain::{ChainId, Currency, FeeAmount, NativeCurrency, Tick, Token};
    use crate::math::tick_math::{MAX_TICK, MIN_TICK};
    use crate::math::Q96;
    use crate::pools::{ConcentratedPool, Pair, Pool};
    use crate::routing::{encode_address, path_length, AMM_FEE_PATH_PLACEHOLDER};
    use alloy_primitives::U256;

    fn addr(s: &str) -> TokenAddress {
        let Ok(a) = TokenAddress::parse(s) else {
            panic!("valid address");
        };
        a
    }

    fn token(s: &str, sym: &str) -> Token {
        Token::new(ChainId::MAINNET, addr(s), 8, sym)
    }

    fn move_native(wrapped: &Token) -> Currency {
        NativeCurrency::new(ChainId::MAINNET, 8, "MOVE", "Move", wrapped.clone()).into()
    }

    fn pair(a: &Token, b: &Token, ra: u64, rb: u64) -> Pool {
        let amount = |t: &Token, r: u64| {
            let Ok(x) = CurrencyAmount::from_raw_amount(t.clone().into(), r) else {
                panic!("in range");
            };
            x
        };
        let Ok(p) = Pair::new(amount(a, ra), amount(b, rb)) else {
            panic!("valid pair");
        };
        p.into()
    }

    /// Full-range concentrated pool at price 1.
    fn concentrated(a: &Token, b: &Token, fee: FeeAmount) -> Pool {
        let spacing = fee.tick_spacing();
        let liquidity: u128 = 10_000_000_000;
        let net = 10_000_000_000_i128;
        let (Ok(lower), Ok(upper)) = (
            Tick::new(MIN_TICK / spacing * spacing, liquidity, net),
            Tick::new(MAX_TICK / spacing * spacing, liquidity, -net),
        ) else {
            panic!("ticks in range");
        };
        let Ok(p) =
            ConcentratedPool::new(a.clone(), b.clone(), fee, Q96, liquidity, 0, vec![lower, upper])
        else {
            panic!("valid pool");
        };
        p.into()
    }

    fn route(pools: Vec<Pool>, input: Currency, output: Currency) -> Route {
        match Route::new(pools, input, output) {
            Ok(r) => r,
            Err(e) => panic!("valid route: {e}"),
        }
    }

    fn trade(route: Route, currency: &Currency, raw: u64, trade_type: TradeType) -> Trade {
        let Ok(amount) = CurrencyAmount::from_raw_amount(currency.clone(), raw) else {
            panic!("in range");
        };
        match Trade::from_route(route, &amount, trade_type) {
            Ok(t) => t,
            Err(e) => panic!("quotes: {e}"),
        }
    }

    fn router() -> SwapRouter {
        let Ok(cfg) = RouterConfig::movement(ChainId::MAINNET) else {
            panic!("preset");
        };
        SwapRouter::new(cfg)
    }

    fn options() -> SwapOptions {
        SwapOptions::new(Percent::new(1, 100), addr("0xbeef"), Deadline::At(1_000))
    }

    fn encode(trades: &[Trade], opts: &SwapOptions) -> EncodedSwaps {
        match router().encode_swaps(trades, opts) {
            Ok(e) => e,
            Err(e) => panic!("encodes: {e}"),
        }
    }

    fn amount_arg(call: &SwapCall, i: usize) -> BigInt {
        let Some(v) = call.args()[i].as_amount() else {
            panic!("argument {i} of {call} is not an amount");
        };
        v.clone()
    }

    // -- Constant product --------------------------------------------------

    #[test]
    fn constant_product_exact_input() {
        let (a, b) = (token("0x1", "A"), token("0x2", "B"));
        let r = route(vec![pair(&a, &b, 1_000_000, 1_000_000)], a.clone().into(), b.clone().into());
        let t = trade(r, &a.clone().into(), 1_000, TradeType::ExactInput);
        let quoted = t.output_amount().quotient();
        let encoded = encode(&[t], &options());

        let [call] = encoded.calls() else {
            panic!("one call");
        };
        assert_eq!(call.method(), "swap_exact_tokens_for_tokens");
        assert!(call.function().contains("::amm_router::"));
        assert_eq!(amount_arg(call, 0), BigInt::from(1_000));
        // floor(quoted / 1.01)
        assert_eq!(amount_arg(call, 1), &quoted * 100 / 101);
        assert_eq!(call.args()[2], CallArgument::Addresses(vec![*a.address(), *b.address()]));
        assert_eq!(call.args()[3], CallArgument::Address(addr("0xbeef")));
        assert_eq!(call.args()[4], CallArgument::Deadline(1_000));
        assert_eq!(encoded.quote_amount_out().quotient(), quoted);
        assert!(!encoded.partial_fill_risk());
    }

    #[test]
    fn constant_product_native_methods() {
        let (w, b) = (token("0xa", "WMOVE"), token("0x2", "B"));
        let native = move_native(&w);

        let r = route(vec![pair(&w, &b, 1_000_000, 1_000_000)], native.clone(), b.clone().into());
        let encoded = encode(&[trade(r, &native, 1_000, TradeType::ExactInput)], &options());
        assert_eq!(encoded.calls()[0].method(), "swap_exact_move_for_tokens");
        assert!(encoded.input_is_native());

        let r = route(vec![pair(&w, &b, 1_000_000, 1_000_000)], b.clone().into(), native.clone());
        let encoded = encode(&[trade(r, &native, 1_000, TradeType::ExactOutput)], &options());
        let call = &encoded.calls()[0];
        assert_eq!(call.method(), "swap_tokens_for_exact_move");
        assert_eq!(amount_arg(call, 0), BigInt::from(1_000));
        assert!(encoded.output_is_native());

        let r = route(vec![pair(&w, &b, 1_000_000, 1_000_000)], native.clone(), b.clone().into());
        let t = trade(r, &b.clone().into(), 1_000, TradeType::ExactOutput);
        let encoded = encode(&[t], &options());
        let call = &encoded.calls()[0];
        assert_eq!(call.method(), "swap_move_for_exact_tokens");
        // amount in (max) comes first for this method
        assert_eq!(&amount_arg(call, 0), &encoded.total_amount_in().quotient());
        assert_eq!(amount_arg(call, 1), BigInt::from(1_000));
    }

    #[test]
    fn constant_product_exact_output_argument_order() {
        let (a, b) = (token("0x1", "A"), token("0x2", "B"));
        let r = route(vec![pair(&a, &b, 1_000_000, 1_000_000)], a.clone().into(), b.clone().into());
        let t = trade(r, &b.clone().into(), 1_000, TradeType::ExactOutput);
        let encoded = encode(&[t], &options());
        let call = &encoded.calls()[0];
        assert_eq!(call.method(), "swap_tokens_for_exact_tokens");
        assert_eq!(amount_arg(call, 0), BigInt::from(1_000));
        // 1005 quoted, floor(1005 * 1.01)
        assert_eq!(amount_arg(call, 1), BigInt::from(1_015));
    }

    #[test]
    fn native_on_both_sides_is_rejected() {
        let (w, b) = (token("0xa", "WMOVE"), token("0x2", "B"));
        let native = move_native(&w);
        let c = token("0x3", "C");
        let r = route(
            vec![
                pair(&w, &b, 1_000_000, 1_000_000),
                pair(&b, &c, 1_000_000, 1_000_000),
                pair(&c, &w, 1_000_000, 1_000_000),
            ],
            native.clone(),
            native.clone(),
        );
        let t = trade(r, &native, 1_000, TradeType::ExactInput);
        assert_eq!(
            router().encode_swaps(&[t], &options()),
            Err(RouteError::UnsupportedOperation("MOVE_IN_OUT"))
        );
    }

    // -- Concentrated --------------------------------------------------------

    #[test]
    fn concentrated_single_hop_exact_input() {
        let (a, b) = (token("0x1", "A"), token("0x2", "B"));
        let pools = vec![concentrated(&a, &b, FeeAmount::Medium)];
        let r = route(pools, a.clone().into(), b.clone().into());
        let t = trade(r, &a.clone().into(), 10_000, TradeType::ExactInput);
        let encoded = encode(&[t], &options());
        let call = &encoded.calls()[0];
        assert_eq!(call.method(), "exact_input_single");
        assert!(call.function().contains("::clamm_router::"));
        assert_eq!(call.args()[0], CallArgument::Address(*a.address()));
        assert_eq!(call.args()[1], CallArgument::Address(*b.address()));
        assert_eq!(call.args()[2], CallArgument::Fee(2_500));
        assert_eq!(amount_arg(call, 5), BigInt::from(10_000));
        assert_eq!(call.args()[7], CallArgument::SqrtPriceLimit(U256::ZERO));
    }

    #[test]
    fn concentrated_single_hop_exact_output_carries_limit() {
        let (a, b) = (token("0x1", "A"), token("0x2", "B"));
        let pools = vec![concentrated(&a, &b, FeeAmount::Low)];
        let r = route(pools, a.clone().into(), b.clone().into());
        let t = trade(r, &b.clone().into(), 10_000, TradeType::ExactOutput);
        let limit = U256::from(4_295_128_740_u64);
        let encoded = encode(&[t], &options().with_sqrt_price_limit(limit));
        let call = &encoded.calls()[0];
        assert_eq!(call.method(), "exact_output_single");
        assert_eq!(amount_arg(call, 5), BigInt::from(10_000));
        assert_eq!(call.args()[7], CallArgument::SqrtPriceLimit(limit));
    }

    #[test]
    fn concentrated_multi_hop_uses_packed_path() {
        let long = |d: &str| format!("0x{}", d.repeat(64));
        let (a, b, c) = (token(&long("a"), "A"), token(&long("b"), "B"), token(&long("c"), "C"));
        let pools = vec![
            concentrated(&a, &b, FeeAmount::Low),
            concentrated(&b, &c, FeeAmount::Low),
        ];
        let r = route(pools.clone(), a.clone().into(), c.clone().into());
        let t = trade(r, &a.clone().into(), 10_000, TradeType::ExactInput);
        let encoded = encode(&[t], &options());
        let call = &encoded.calls()[0];
        assert_eq!(call.method(), "exact_input");
        let Some(path) = call.args()[0].as_bytes() else {
            panic!("path bytes");
        };
        assert_eq!(path.len(), path_length(2));
        assert_eq!(&path[..32], &encode_address(&a));

        let r = route(pools, a.clone().into(), c.clone().into());
        let t = trade(r, &c.clone().into(), 5_000, TradeType::ExactOutput);
        let encoded = encode(&[t], &options());
        let call = &encoded.calls()[0];
        assert_eq!(call.method(), "exact_output");
        let Some(path) = call.args()[0].as_bytes() else {
            panic!("path bytes");
        };
        assert_eq!(&path[..32], &encode_address(&c));
        assert_ne!(encode_address(&a), encode_address(&c));
        assert_eq!(amount_arg(call, 3), BigInt::from(5_000));
    }

    #[test]
    fn multi_hop_price_limit_is_rejected() {
        let (a, b, c) = (token("0x1", "A"), token("0x2", "B"), token("0x3", "C"));
        let r = route(
            vec![concentrated(&a, &b, FeeAmount::Low), concentrated(&b, &c, FeeAmount::Low)],
            a.clone().into(),
            c.clone().into(),
        );
        let t = trade(r, &a.clone().into(), 10_000, TradeType::ExactInput);
        let opts = options().with_sqrt_price_limit(U256::from(4_295_128_740_u64));
        assert_eq!(
            router().encode_swaps(&[t], &opts),
            Err(RouteError::RouteInvalid("MULTIHOP_PRICE_LIMIT"))
        );
    }

    // -- Mixed -----------------------------------------------------------------

    #[test]
    fn mixed_route_is_split_into_sections() {
        let (a, b) = (token("0x1", "A"), token("0x2", "B"));
        let (c, d) = (token("0x3", "C"), token("0x4", "D"));
        let r = route(
            vec![
                concentrated(&a, &b, FeeAmount::Low),
                concentrated(&b, &c, FeeAmount::Low),
                pair(&c, &d, 1_000_000, 1_000_000),
            ],
            a.clone().into(),
            d.clone().into(),
        );
        let t = trade(r, &a.clone().into(), 10_000, TradeType::ExactInput);
        let encoded = encode(&[t], &options());
        let [first, second] = encoded.calls() else {
            panic!("two sections");
        };

        assert_eq!(first.method(), "exact_input");
        let Some(path) = first.args()[0].as_bytes() else {
            panic!("path bytes");
        };
        assert_eq!(path.len(), path_length(2));
        assert_eq!(amount_arg(first, 3), BigInt::from(10_000));
        assert_eq!(amount_arg(first, 4), BigInt::from(0));

        assert_eq!(second.method(), "swap_exact_tokens_for_tokens");
        assert_eq!(amount_arg(second, 0), BigInt::from(0));
        assert_eq!(amount_arg(second, 1), encoded.minimum_amount_out().quotient());
        assert_eq!(second.args()[2], CallArgument::Addresses(vec![*c.address(), *d.address()]));
    }

    #[test]
    fn partition_never_yields_mixed_sections() {
        let (a, b) = (token("0x1", "A"), token("0x2", "B"));
        let (c, d) = (token("0x3", "C"), token("0x4", "D"));
        let r = route(
            vec![
                pair(&a, &b, 1_000_000, 1_000_000),
                concentrated(&b, &c, FeeAmount::Low),
                pair(&c, &d, 1_000_000, 1_000_000),
            ],
            a.clone().into(),
            d.clone().into(),
        );
        let Ok(sections) = partition_by_protocol(&r) else {
            panic!("partitions");
        };
        let protocols: Vec<Protocol> = sections.iter().map(Route::protocol).collect();
        assert_eq!(
            protocols,
            vec![Protocol::ConstantProduct, Protocol::Concentrated, Protocol::ConstantProduct]
        );
        assert!(sections.iter().all(Route::is_single_hop));
        assert_eq!(sections[1].input(), &Currency::from(b.clone()));
        assert_eq!(sections[1].output(), &Currency::from(c.clone()));

        let t = trade(r, &a.clone().into(), 10_000, TradeType::ExactInput);
        let encoded = encode(&[t], &options());
        let methods: Vec<&str> = encoded.calls().iter().map(SwapCall::method).collect();
        assert_eq!(
            methods,
            vec!["swap_exact_tokens_for_tokens", "exact_input", "swap_exact_tokens_for_tokens"]
        );
    }

    #[test]
    fn mixed_placeholder_only_in_mixed_sections() {
        let (a, b, c) = (token("0x1", "A"), token("0x2", "B"), token("0x3", "C"));
        let r = route(
            vec![pair(&a, &b, 1_000_000, 1_000_000), concentrated(&b, &c, FeeAmount::Low)],
            a.clone().into(),
            c.clone().into(),
        );
        let t = trade(r, &a.clone().into(), 10_000, TradeType::ExactInput);
        let encoded = encode(&[t], &options());
        let [first, second] = encoded.calls() else {
            panic!("two sections");
        };
        assert_eq!(first.method(), "swap_exact_tokens_for_tokens");
        let Some(path) = second.args()[0].as_bytes() else {
            panic!("path bytes");
        };
        assert_eq!(path.len(), path_length(1));
        let placeholder = &u64::from(AMM_FEE_PATH_PLACEHOLDER).to_le_bytes()[..3];
        assert_ne!(&path[32..35], placeholder);
        assert_eq!(amount_arg(second, 3), BigInt::from(0));
    }

    #[test]
    fn mixed_exact_output_is_unsupported() {
        let (a, b, c) = (token("0x1", "A"), token("0x2", "B"), token("0x3", "C"));
        let r = route(
            vec![pair(&a, &b, 1_000_000, 1_000_000), concentrated(&b, &c, FeeAmount::Low)],
            a.clone().into(),
            c.clone().into(),
        );
        let t = trade(r, &c.clone().into(), 1_000, TradeType::ExactOutput);
        assert_eq!(
            router().encode_swaps(&[t], &options()),
            Err(RouteError::UnsupportedOperation("TRADE_TYPE"))
        );
    }

    // -- Batches -----------------------------------------------------------

    #[test]
    fn more_than_two_exact_input_swaps_zero_min_out() {
        let (a, b, c) = (token("0x1", "A"), token("0x2", "B"), token("0x3", "C"));
        let direct =
            route(vec![pair(&a, &c, 1_000_000, 1_000_000)], a.clone().into(), c.clone().into());
        let via_b = route(
            vec![pair(&a, &b, 1_000_000, 1_000_000), pair(&b, &c, 1_000_000, 1_000_000)],
            a.clone().into(),
            c.clone().into(),
        );
        let clamm =
            route(vec![concentrated(&a, &c, FeeAmount::Low)], a.clone().into(), c.clone().into());
        let trades = [
            trade(direct, &a.clone().into(), 1_000, TradeType::ExactInput),
            trade(via_b, &a.clone().into(), 1_000, TradeType::ExactInput),
            trade(clamm, &a.clone().into(), 1_000, TradeType::ExactInput),
        ];
        let encoded = encode(&trades, &options());
        assert_eq!(encoded.calls().len(), 3);
        assert_eq!(amount_arg(&encoded.calls()[0], 1), BigInt::from(0));
        assert_eq!(amount_arg(&encoded.calls()[1], 1), BigInt::from(0));
        assert_eq!(amount_arg(&encoded.calls()[2], 6), BigInt::from(0));
        assert_eq!(encoded.total_amount_in().quotient(), BigInt::from(3_000));
        assert!(encoded.minimum_amount_out().quotient() > BigInt::from(0));
    }

    #[test]
    fn batch_must_agree_on_currencies_and_direction() {
        let (a, b, c) = (token("0x1", "A"), token("0x2", "B"), token("0x3", "C"));
        let direct = |x: &Token, y: &Token| {
            route(vec![pair(x, y, 1_000_000, 1_000_000)], x.clone().into(), y.clone().into())
        };
        let ab = || direct(&a, &b);
        let cb = direct(&c, &b);
        let ac = direct(&a, &c);

        let base = trade(ab(), &a.clone().into(), 1_000, TradeType::ExactInput);
        let other_in = trade(cb, &c.clone().into(), 1_000, TradeType::ExactInput);
        let other_out = trade(ac, &a.clone().into(), 1_000, TradeType::ExactInput);
        let other_dir = trade(ab(), &b.clone().into(), 1_000, TradeType::ExactOutput);

        let r = router();
        assert_eq!(
            r.encode_swaps(&[base.clone(), other_in], &options()),
            Err(RouteError::CurrencyMismatch("TOKEN_IN_DIFF"))
        );
        assert_eq!(
            r.encode_swaps(&[base.clone(), other_out], &options()),
            Err(RouteError::CurrencyMismatch("TOKEN_OUT_DIFF"))
        );
        assert_eq!(
            r.encode_swaps(&[base, other_dir], &options()),
            Err(RouteError::UnsupportedOperation("TRADE_TYPE_DIFF"))
        );
        assert_eq!(r.encode_swaps(&[], &options()), Err(RouteError::InvalidArgument("TRADES")));
    }

    #[test]
    fn high_impact_concentrated_trade_flags_partial_fill() {
        let (a, b) = (token("0x1", "A"), token("0x2", "B"));
        let pools = vec![concentrated(&a, &b, FeeAmount::Low)];
        let r = route(pools, a.clone().into(), b.clone().into());
        // input twice the active liquidity moves the price to a third
        let t = trade(r, &a.clone().into(), 20_000_000_000, TradeType::ExactInput);
        let encoded = encode(&[t], &options());
        assert!(encoded.partial_fill_risk());

        let r = route(vec![pair(&a, &b, 1_000, 1_000)], a.clone().into(), b.clone().into());
        let t = trade(r, &a.clone().into(), 10_000, TradeType::ExactInput);
        assert!(!encode(&[t], &options()).partial_fill_risk());
    }

    #[test]
    fn ttl_deadline_is_resolved() {
        let (a, b) = (token("0x1", "A"), token("0x2", "B"));
        let r = route(vec![pair(&a, &b, 1_000_000, 1_000_000)], a.clone().into(), b.clone().into());
        let t = trade(r, &a.clone().into(), 1_000, TradeType::ExactInput);
        let opts = SwapOptions::new(Percent::new(1, 100), addr("0xbeef"), Deadline::default());
        let encoded = encode(&[t], &opts);
        let CallArgument::Deadline(secs) = encoded.calls()[0].args()[4] else {
            panic!("deadline argument");
        };
        assert!(secs > DEFAULT_DEADLINE_TTL);
    }
}
