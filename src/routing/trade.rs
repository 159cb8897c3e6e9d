//! Quoted trades over one or more routes.
//!
//! A [`Trade`] splits an amount across routes that share their wrapped
//! input and output currencies.  Each route contributes one
//! [`RouteSwap`] carrying the exact amounts the pools quoted for it.
//!
//! # Slippage Bounds
//!
//! For a tolerance `t`:
//!
//! - exact input: `minimum_amount_out = floor(out / (1 + t))`, input fixed
//! - exact output: `maximum_amount_in = floor(in × (1 + t))`, output fixed
//!
//! # Price Impact
//!
//! `spot = Σ mid_price_i · input_i` over the routes, and the impact is
//! `(spot − output) / spot`.  A zero spot output yields zero impact.

use std::collections::HashSet;

use num_bigint::BigInt;
use once_cell::sync::OnceCell;
use tracing::debug;

use super::Route;
use crate::domain::{Currency, CurrencyAmount, Fraction, Percent, Price, TradeType};
use crate::error::{Result, RouteError};
use crate::traits::SwapPool;

/// One route of a trade with the amounts quoted through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSwap {
    route: Route,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
}

impl RouteSwap {
    /// Pairs a route with already quoted amounts.
    #[must_use]
    pub const fn new(
        route: Route,
        input_amount: CurrencyAmount,
        output_amount: CurrencyAmount,
    ) -> Self {
        Self {
            route,
            input_amount,
            output_amount,
        }
    }

    /// Quotes `amount` through `route` in the given direction.
    ///
    /// # Errors
    ///
    /// - [`RouteError::CurrencyMismatch`] if `amount` is not in the
    ///   route's input (exact input) or output (exact output) currency.
    /// - Any pool quoting error along the way.
    pub fn quote(route: Route, amount: &CurrencyAmount, trade_type: TradeType) -> Result<Self> {
        let (input_amount, output_amount) = match trade_type {
            TradeType::ExactInput => {
                if amount.currency() != route.input() {
                    return Err(RouteError::CurrencyMismatch("INPUT"));
                }
                let mut running = amount.wrapped();
                for pool in route.pools() {
                    running = pool.get_output_amount(&running)?.0;
                }
                (amount.clone(), Self::rebrand(&running, route.output())?)
            }
            TradeType::ExactOutput => {
                if amount.currency() != route.output() {
                    return Err(RouteError::CurrencyMismatch("OUTPUT"));
                }
                let mut running = amount.wrapped();
                for pool in route.pools().iter().rev() {
                    running = pool.get_input_amount(&running)?.0;
                }
                (Self::rebrand(&running, route.input())?, amount.clone())
            }
        };
        debug!(
            protocol = %route.protocol(),
            hops = route.pools().len(),
            %trade_type,
            amount_in = %input_amount.quotient(),
            amount_out = %output_amount.quotient(),
            "route quoted"
        );
        Ok(Self::new(route, input_amount, output_amount))
    }

    fn rebrand(amount: &CurrencyAmount, currency: &Currency) -> Result<CurrencyAmount> {
        let fraction = amount.as_fraction();
        CurrencyAmount::from_fractional_amount(
            currency.clone(),
            fraction.numerator().clone(),
            fraction.denominator().clone(),
        )
    }

    /// Returns the route.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the amount entering the route.
    #[must_use]
    pub const fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    /// Returns the amount leaving the route.
    #[must_use]
    pub const fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }
}

/// A quoted trade across one or more routes in a single direction.
///
/// # Examples
///
/// ```
/// use hydra_route::domain::{ChainId, CurrencyAmount, Percent, Token, TokenAddress, TradeType};
/// use hydra_route::pools::{Pair, Pool};
/// use hydra_route::routing::{Route, Trade};
///
/// let token = |addr: &str| {
///     Token::new(ChainId::MAINNET, TokenAddress::parse(addr).expect("ok"), 8, "T")
/// };
/// let (a, b) = (token("0x1"), token("0x2"));
/// let amount = |t: &Token, raw: u64| CurrencyAmount::from_raw_amount(t.clone().into(), raw).expect("ok");
/// let pair = Pair::new(amount(&a, 100), amount(&b, 101)).expect("valid pair");
/// let route = Route::new(vec![Pool::from(pair)], a.clone().into(), b.into()).expect("valid route");
///
/// let trade = Trade::from_route(route, &amount(&a, 10), TradeType::ExactInput).expect("quote");
/// assert_eq!(trade.output_amount().quotient(), 9.into());
/// let min_out = trade.minimum_amount_out(&Percent::new(50, 100), None).expect("bound");
/// assert_eq!(min_out.quotient(), 6.into());
/// ```
#[derive(Debug, Clone)]
pub struct Trade {
    swaps: Vec<RouteSwap>,
    trade_type: TradeType,
    input_amount: CurrencyAmount,
    output_amount: CurrencyAmount,
    price_impact: OnceCell<Percent>,
}

impl Trade {
    /// Builds a trade from pre-quoted route swaps.
    ///
    /// # Errors
    ///
    /// - [`RouteError::RouteInvalid`]`("ROUTES")` if `swaps` is empty.
    /// - [`RouteError::CurrencyMismatch`] (`INPUT_CURRENCY_MATCH`,
    ///   `OUTPUT_CURRENCY_MATCH`) if the routes disagree on the wrapped
    ///   input or output.
    /// - [`RouteError::RouteInvalid`]`("POOLS_DUPLICATED")` if a pool
    ///   appears more than once across all routes.
    pub fn new(swaps: Vec<RouteSwap>, trade_type: TradeType) -> Result<Self> {
        let Some(first) = swaps.first() else {
            return Err(RouteError::RouteInvalid("ROUTES"));
        };
        let input_token = first.input_amount.currency().wrapped();
        let output_token = first.output_amount.currency().wrapped();
        if swaps.iter().any(|s| s.route.input().wrapped() != input_token) {
            return Err(RouteError::CurrencyMismatch("INPUT_CURRENCY_MATCH"));
        }
        if swaps.iter().any(|s| s.route.output().wrapped() != output_token) {
            return Err(RouteError::CurrencyMismatch("OUTPUT_CURRENCY_MATCH"));
        }

        let mut seen = HashSet::new();
        for pool in swaps.iter().flat_map(|s| s.route.pools()) {
            if !seen.insert(pool.pool_key()) {
                return Err(RouteError::RouteInvalid("POOLS_DUPLICATED"));
            }
        }

        let mut input_amount =
            CurrencyAmount::from_raw_amount(first.input_amount.currency().clone(), 0)?;
        let mut output_amount =
            CurrencyAmount::from_raw_amount(first.output_amount.currency().clone(), 0)?;
        for swap in &swaps {
            input_amount = input_amount.add(&swap.input_amount)?;
            output_amount = output_amount.add(&swap.output_amount)?;
        }

        Ok(Self {
            swaps,
            trade_type,
            input_amount,
            output_amount,
            price_impact: OnceCell::new(),
        })
    }

    /// Quotes `amount` through a single route.
    ///
    /// # Errors
    ///
    /// Same as [`RouteSwap::quote`].
    pub fn from_route(
        route: Route,
        amount: &CurrencyAmount,
        trade_type: TradeType,
    ) -> Result<Self> {
        Self::new(vec![RouteSwap::quote(route, amount, trade_type)?], trade_type)
    }

    /// Quotes each `(route, amount)` split and aggregates them.
    ///
    /// # Errors
    ///
    /// Same as [`RouteSwap::quote`] and [`Trade::new`].
    pub fn from_routes<I>(routes: I, trade_type: TradeType) -> Result<Self>
    where
        I: IntoIterator<Item = (Route, CurrencyAmount)>,
    {
        let swaps = routes
            .into_iter()
            .map(|(route, amount)| RouteSwap::quote(route, &amount, trade_type))
            .collect::<Result<Vec<_>>>()?;
        Self::new(swaps, trade_type)
    }

    /// Returns the per-route swaps.
    #[must_use]
    pub fn swaps(&self) -> &[RouteSwap] {
        &self.swaps
    }

    /// Returns the routes in swap order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.swaps.iter().map(RouteSwap::route)
    }

    /// Returns the trade direction.
    #[must_use]
    pub const fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    /// Total input across all routes.
    #[must_use]
    pub const fn input_amount(&self) -> &CurrencyAmount {
        &self.input_amount
    }

    /// Total output across all routes.
    #[must_use]
    pub const fn output_amount(&self) -> &CurrencyAmount {
        &self.output_amount
    }

    /// Output per input actually achieved.
    #[must_use]
    pub fn execution_price(&self) -> Price {
        Price::new(
            self.input_amount.currency().clone(),
            self.output_amount.currency().clone(),
            self.input_amount.quotient(),
            self.output_amount.quotient(),
        )
    }

    /// Relative shortfall of the output against the routes' mid prices.
    ///
    /// # Errors
    ///
    /// Propagates mid-price and amount arithmetic errors.
    pub fn price_impact(&self) -> Result<&Percent> {
        self.price_impact.get_or_try_init(|| {
            let mut spot =
                CurrencyAmount::from_raw_amount(self.output_amount.currency().clone(), 0)?;
            for swap in &self.swaps {
                let quoted = swap.route.mid_price()?.quote(&swap.input_amount)?;
                spot = spot.add(&Self::in_currency(&quoted, spot.currency())?)?;
            }
            if spot.is_zero() {
                return Ok(Percent::zero());
            }
            let shortfall = spot.subtract(&self.output_amount)?;
            let impact = shortfall.as_fraction() / spot.as_fraction();
            Ok(Percent::from_fraction(impact))
        })
    }

    fn in_currency(amount: &CurrencyAmount, currency: &Currency) -> Result<CurrencyAmount> {
        if amount.currency() == currency {
            return Ok(amount.clone());
        }
        let fraction = amount.as_fraction();
        CurrencyAmount::from_fractional_amount(
            currency.clone(),
            fraction.numerator().clone(),
            fraction.denominator().clone(),
        )
    }

    /// Least output acceptable under `slippage`.
    ///
    /// Applies to `amount_out`, or to the trade's total output when `None`.
    /// Exact-output trades return the amount unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`]`("SLIPPAGE_TOLERANCE")` for a
    /// negative tolerance.
    pub fn minimum_amount_out(
        &self,
        slippage: &Percent,
        amount_out: Option<&CurrencyAmount>,
    ) -> Result<CurrencyAmount> {
        Self::check_slippage(slippage)?;
        let amount = amount_out.unwrap_or(&self.output_amount);
        match self.trade_type {
            TradeType::ExactOutput => Ok(amount.clone()),
            TradeType::ExactInput => {
                let factor = (&Fraction::one() + slippage.as_fraction()).invert();
                let adjusted = &factor * &Fraction::from_integer(amount.quotient());
                CurrencyAmount::from_raw_amount(amount.currency().clone(), adjusted.quotient())
            }
        }
    }

    /// Most input acceptable under `slippage`.
    ///
    /// Applies to `amount_in`, or to the trade's total input when `None`.
    /// Exact-input trades return the amount unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidArgument`]`("SLIPPAGE_TOLERANCE")` for a
    /// negative tolerance.
    pub fn maximum_amount_in(
        &self,
        slippage: &Percent,
        amount_in: Option<&CurrencyAmount>,
    ) -> Result<CurrencyAmount> {
        Self::check_slippage(slippage)?;
        let amount = amount_in.unwrap_or(&self.input_amount);
        match self.trade_type {
            TradeType::ExactInput => Ok(amount.clone()),
            TradeType::ExactOutput => {
                let factor = &Fraction::one() + slippage.as_fraction();
                let adjusted = &factor * &Fraction::from_integer(amount.quotient());
                CurrencyAmount::from_raw_amount(amount.currency().clone(), adjusted.quotient())
            }
        }
    }

    /// Execution price with both slippage bounds applied.
    ///
    /// # Errors
    ///
    /// Same as [`Trade::minimum_amount_out`].
    pub fn worst_execution_price(&self, slippage: &Percent) -> Result<Price> {
        let max_in: BigInt = self.maximum_amount_in(slippage, None)?.quotient();
        let min_out: BigInt = self.minimum_amount_out(slippage, None)?.quotient();
        Ok(Price::new(
            self.input_amount.currency().clone(),
            self.output_amount.currency().clone(),
            max_in,
            min_out,
        ))
    }

    fn check_slippage(slippage: &Percent) -> Result<()> {
        if slippage.is_negative() {
            return Err(RouteError::InvalidArgument("SLIPPAGE_TOLERANCE"));
        }
        Ok(())
    }
}

impl PartialEq for Trade {
    fn eq(&self, other: &Self) -> bool {
        self.swaps == other.swaps && self.trade_type == other.trade_type
    }
}

impl Eq for Trade {}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{ChainId, NativeCurrency, Rounding, Token, TokenAddress};
    use crate::pools::{Pair, Pool};

    fn token(addr: &str, sym: &str) -> Token {
        let Ok(a) = TokenAddress::parse(addr) else {
            panic!("valid address");
        };
        Token::new(ChainId::MAINNET, a, 18, sym)
    }

    fn weth() -> Token {
        token("0xa", "WETH")
    }

    fn eth() -> Currency {
        NativeCurrency::new(ChainId::MAINNET, 18, "ETH", "Ether", weth()).into()
    }

    fn t0() -> Token {
        token("0x1", "T0")
    }

    fn t1() -> Token {
        token("0x2", "T1")
    }

    fn t2() -> Token {
        token("0x3", "T2")
    }

    fn amount(currency: impl Into<Currency>, raw: u64) -> CurrencyAmount {
        let Ok(a) = CurrencyAmount::from_raw_amount(currency.into(), raw) else {
            panic!("in range");
        };
        a
    }

    fn pair(a: &Token, ra: u64, b: &Token, rb: u64) -> Pool {
        let Ok(p) = Pair::new(amount(a.clone(), ra), amount(b.clone(), rb)) else {
            panic!("valid pair");
        };
        p.into()
    }

    fn route(pools: Vec<Pool>, input: impl Into<Currency>, output: impl Into<Currency>) -> Route {
        match Route::new(pools, input.into(), output.into()) {
            Ok(r) => r,
            Err(e) => panic!("valid route: {e}"),
        }
    }

    fn trade(r: Route, amt: CurrencyAmount, trade_type: TradeType) -> Trade {
        match Trade::from_route(r, &amt, trade_type) {
            Ok(t) => t,
            Err(e) => panic!("quote: {e}"),
        }
    }

    // -- Quoting ------------------------------------------------------------

    #[test]
    fn exact_input_single_hop() {
        let r = route(vec![pair(&t0(), 100, &t1(), 101)], t0(), t1());
        let t = trade(r, amount(t0(), 10), TradeType::ExactInput);
        assert_eq!(t.input_amount().quotient(), BigInt::from(10));
        assert_eq!(t.output_amount().quotient(), BigInt::from(9));
        assert_eq!(t.output_amount().currency(), &Currency::from(t1()));
    }

    #[test]
    fn exact_input_multi_hop() {
        let r = route(
            vec![pair(&t0(), 1_000, &t1(), 1_000), pair(&t1(), 1_000, &t2(), 1_000)],
            t0(),
            t2(),
        );
        let t = trade(r, amount(t0(), 100), TradeType::ExactInput);
        // 100 -> 90 -> 82
        assert_eq!(t.output_amount().quotient(), BigInt::from(82));
    }

    #[test]
    fn exact_output_multi_hop() {
        let r = route(
            vec![pair(&t0(), 1_000, &t1(), 1_000), pair(&t1(), 1_000, &t2(), 1_000)],
            t0(),
            t2(),
        );
        let t = trade(r, amount(t2(), 82), TradeType::ExactOutput);
        // 82 <- 90 <- 100
        assert_eq!(t.input_amount().quotient(), BigInt::from(100));
        assert_eq!(t.output_amount().quotient(), BigInt::from(82));
    }

    #[test]
    fn native_input_keeps_native_amount() {
        let r = route(vec![pair(&weth(), 100, &t0(), 101)], eth(), t0());
        let t = trade(r, amount(eth(), 10), TradeType::ExactInput);
        assert!(t.input_amount().currency().is_native());
        assert_eq!(t.output_amount().quotient(), BigInt::from(9));
    }

    #[test]
    fn native_output_is_rebranded() {
        let r = route(vec![pair(&t0(), 100, &weth(), 101)], t0(), eth());
        let t = trade(r, amount(t0(), 10), TradeType::ExactInput);
        assert_eq!(t.output_amount().currency(), &eth());
    }

    #[test]
    fn amount_in_wrong_currency_is_rejected() {
        let r = route(vec![pair(&t0(), 100, &t1(), 101)], t0(), t1());
        assert_eq!(
            Trade::from_route(r.clone(), &amount(t1(), 10), TradeType::ExactInput),
            Err(RouteError::CurrencyMismatch("INPUT"))
        );
        assert_eq!(
            Trade::from_route(r, &amount(t0(), 10), TradeType::ExactOutput),
            Err(RouteError::CurrencyMismatch("OUTPUT"))
        );
    }

    // -- Aggregation --------------------------------------------------------

    #[test]
    fn aggregates_routes() {
        let direct = route(vec![pair(&t0(), 1_000, &t2(), 1_000)], t0(), t2());
        let via = route(
            vec![pair(&t0(), 1_000, &t1(), 1_000), pair(&t1(), 1_000, &t2(), 1_000)],
            t0(),
            t2(),
        );
        let Ok(t) = Trade::from_routes(
            [(direct, amount(t0(), 100)), (via, amount(t0(), 100))],
            TradeType::ExactInput,
        ) else {
            panic!("valid trade");
        };
        assert_eq!(t.swaps().len(), 2);
        assert_eq!(t.routes().count(), 2);
        assert_eq!(t.input_amount().quotient(), BigInt::from(200));
        assert_eq!(t.output_amount().quotient(), BigInt::from(90 + 82));
    }

    #[test]
    fn duplicate_pool_is_rejected() {
        let shared = pair(&t0(), 1_000, &t1(), 1_000);
        let a = route(vec![shared.clone()], t0(), t1());
        let b = route(vec![shared], t0(), t1());
        assert_eq!(
            Trade::from_routes(
                [(a, amount(t0(), 10)), (b, amount(t0(), 10))],
                TradeType::ExactInput
            ),
            Err(RouteError::RouteInvalid("POOLS_DUPLICATED"))
        );
    }

    #[test]
    fn duplicate_detection_ignores_reserves() {
        let a = route(vec![pair(&t0(), 1_000, &t1(), 1_000)], t0(), t1());
        let b = route(vec![pair(&t1(), 5, &t0(), 7)], t0(), t1());
        let swaps = vec![
            RouteSwap::new(a, amount(t0(), 1), amount(t1(), 1)),
            RouteSwap::new(b, amount(t0(), 1), amount(t1(), 1)),
        ];
        assert_eq!(
            Trade::new(swaps, TradeType::ExactInput),
            Err(RouteError::RouteInvalid("POOLS_DUPLICATED"))
        );
    }

    #[test]
    fn mismatched_routes_are_rejected() {
        let a = route(vec![pair(&t0(), 1_000, &t1(), 1_000)], t0(), t1());
        let b = route(vec![pair(&t0(), 1_000, &t2(), 1_000)], t0(), t2());
        assert_eq!(
            Trade::from_routes(
                [(a, amount(t0(), 10)), (b, amount(t0(), 10))],
                TradeType::ExactInput
            ),
            Err(RouteError::CurrencyMismatch("OUTPUT_CURRENCY_MATCH"))
        );
        assert_eq!(
            Trade::new(vec![], TradeType::ExactInput),
            Err(RouteError::RouteInvalid("ROUTES"))
        );
    }

    // -- Slippage -----------------------------------------------------------

    #[test]
    fn minimum_out_half_percent() {
        let r = route(vec![pair(&t0(), 1_000_000, &t1(), 1_000_000)], t0(), t1());
        let t = trade(r, amount(t0(), 10), TradeType::ExactInput);
        let slippage = Percent::new(5, 1_000);
        let Ok(min) = t.minimum_amount_out(&slippage, Some(&amount(t1(), 1_000))) else {
            panic!("bound");
        };
        assert_eq!(min.quotient(), BigInt::from(995));
        let Ok(max) = t.maximum_amount_in(&slippage, None) else {
            panic!("bound");
        };
        assert_eq!(max, *t.input_amount());
    }

    #[test]
    fn maximum_in_for_exact_output() {
        let r = route(vec![pair(&t0(), 1_000_000, &t1(), 1_000_000)], t0(), t1());
        let t = trade(r, amount(t1(), 1_000), TradeType::ExactOutput);
        // 1_000_000 * 1_000 * 1_000 / (999_000 * 997) + 1 = 1_005
        assert_eq!(t.input_amount().quotient(), BigInt::from(1_005));
        let slippage = Percent::new(1, 100);
        let Ok(max) = t.maximum_amount_in(&slippage, None) else {
            panic!("bound");
        };
        assert_eq!(max.quotient(), BigInt::from(1_015));
        let Ok(min) = t.minimum_amount_out(&slippage, None) else {
            panic!("bound");
        };
        assert_eq!(min, *t.output_amount());
    }

    #[test]
    fn negative_slippage_is_rejected() {
        let r = route(vec![pair(&t0(), 100, &t1(), 101)], t0(), t1());
        let t = trade(r, amount(t0(), 10), TradeType::ExactInput);
        let negative = Percent::new(-1, 100);
        assert_eq!(
            t.minimum_amount_out(&negative, None),
            Err(RouteError::InvalidArgument("SLIPPAGE_TOLERANCE"))
        );
        assert_eq!(
            t.maximum_amount_in(&negative, None),
            Err(RouteError::InvalidArgument("SLIPPAGE_TOLERANCE"))
        );
    }

    // -- Prices -------------------------------------------------------------

    #[test]
    fn execution_and_worst_price() {
        let r = route(vec![pair(&t0(), 100, &t1(), 101)], t0(), t1());
        let t = trade(r, amount(t0(), 10), TradeType::ExactInput);
        assert_eq!(
            t.execution_price().to_significant(3, Rounding::HalfUp).ok().as_deref(),
            Some("0.9")
        );
        let Ok(worst) = t.worst_execution_price(&Percent::new(50, 100)) else {
            panic!("worst price");
        };
        // min out = floor(9 / 1.5) = 6
        assert_eq!(worst.to_significant(3, Rounding::HalfUp).ok().as_deref(), Some("0.6"));
    }

    #[test]
    fn price_impact_single_hop() {
        let r = route(vec![pair(&t0(), 100, &t1(), 101)], t0(), t1());
        let t = trade(r, amount(t0(), 10), TradeType::ExactInput);
        // spot = 10 * 101 / 100 = 10.1; impact = (10.1 - 9) / 10.1
        let Ok(impact) = t.price_impact() else {
            panic!("impact");
        };
        assert_eq!(impact.to_fixed(2, Rounding::HalfUp).ok().as_deref(), Some("10.89"));
        let Ok(cached) = t.price_impact() else {
            panic!("impact");
        };
        assert!(core::ptr::eq(impact, cached));
    }

    #[test]
    fn price_impact_with_native_output() {
        let r = route(vec![pair(&t0(), 100, &weth(), 101)], t0(), eth());
        let t = trade(r, amount(t0(), 10), TradeType::ExactInput);
        let Ok(impact) = t.price_impact() else {
            panic!("impact");
        };
        assert_eq!(impact.to_fixed(2, Rounding::HalfUp).ok().as_deref(), Some("10.89"));
    }
}
