//! View-call parameters for the concentrated-liquidity quoter.

use alloy_primitives::U256;
use tracing::debug;

use super::{CallArgument, QuoteOptions, SwapCall};
use crate::config::RouterConfig;
use crate::domain::{CurrencyAmount, TradeType};
use crate::error::{Result, RouteError};
use crate::routing::{encode_route_to_path, Protocol, Route};

/// Builds quoter view calls for all-concentrated routes.
#[derive(Debug, Clone)]
pub struct SwapQuoter {
    config: RouterConfig,
}

impl SwapQuoter {
    /// Creates a quoter targeting the module in `config`.
    #[must_use]
    pub const fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Returns the quoter configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Builds the call quoting `amount` through `route`.
    ///
    /// Single-hop routes use `quote_exact_{input,output}_single` with
    /// `[token_in, token_out, fee, recipient, amount, sqrt_price_limit]`.
    /// Longer routes use `quote_exact_{input,output}` with
    /// `[path, recipient, amount]`; exact-output paths are reversed.
    ///
    /// # Errors
    ///
    /// - [`RouteError::RouteInvalid`]`("PROTOCOL")` if the route has a
    ///   constant-product hop.
    /// - [`RouteError::RouteInvalid`]`("MULTIHOP_PRICE_LIMIT")` if a price
    ///   limit is set for a multi-hop route.
    pub fn quote_call_parameters(
        &self,
        route: &Route,
        amount: &CurrencyAmount,
        trade_type: TradeType,
        options: &QuoteOptions,
    ) -> Result<SwapCall> {
        if route.protocol() != Protocol::Concentrated {
            return Err(RouteError::RouteInvalid("PROTOCOL"));
        }
        let recipient = CallArgument::OptionalAddress(options.recipient);
        let quote_amount = CallArgument::from_currency_amount(amount);

        let call = if let [pool] = route.pools() {
            let Some(pool) = pool.as_concentrated() else {
                return Err(RouteError::RouteInvalid("PROTOCOL"));
            };
            let path = route.path();
            let method = match trade_type {
                TradeType::ExactInput => "quote_exact_input_single",
                TradeType::ExactOutput => "quote_exact_output_single",
            };
            SwapCall::new(
                self.config.quoter_function(method),
                vec![
                    CallArgument::Address(*path[0].address()),
                    CallArgument::Address(*path[1].address()),
                    CallArgument::Fee(pool.fee().value()),
                    recipient,
                    quote_amount,
                    CallArgument::SqrtPriceLimit(
                        options.sqrt_price_limit_x96.unwrap_or(U256::ZERO),
                    ),
                ],
            )
        } else {
            if options.sqrt_price_limit_x96.is_some() {
                return Err(RouteError::RouteInvalid("MULTIHOP_PRICE_LIMIT"));
            }
            let exact_output = trade_type == TradeType::ExactOutput;
            let method = if exact_output {
                "quote_exact_output"
            } else {
                "quote_exact_input"
            };
            SwapCall::new(
                self.config.quoter_function(method),
                vec![
                    CallArgument::Bytes(encode_route_to_path(route, exact_output)?),
                    recipient,
                    quote_amount,
                ],
            )
        };
        debug!(method = call.method(), hops = route.pools().len(), %trade_type, "quote call");
        Ok(call)
    }
}
