//! Routes, trades and the byte paths the on-chain routers consume.
//!
//! A [`Route`] is a validated chain of pools.  A [`Trade`] quotes an
//! amount through one or more routes, each leg kept as a [`RouteSwap`],
//! and derives execution price, price impact and slippage bounds from
//! the result.

mod path;
mod route;
mod trade;

pub use path::{
    encode_address, encode_mixed_route_to_path, encode_route_to_path, path_length,
    AMM_FEE_PATH_PLACEHOLDER, FEE_LENGTH,
};
pub use route::{Protocol, Route};
pub use trade::{RouteSwap, Trade};
