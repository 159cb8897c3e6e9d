//! Entry-function call builders for the on-chain routers and quoter.
//!
//! [`SwapRouter`] turns quoted [`Trade`](crate::routing::Trade)s into
//! ordered [`SwapCall`]s and totals the slippage-bounded amounts.
//! [`SwapQuoter`] builds view calls that re-quote a concentrated route
//! on-chain.  Function targets come from
//! [`RouterConfig`](crate::config::RouterConfig).

mod call;
mod options;
mod quoter;
mod swap_router;

pub use call::{CallArgument, SwapCall};
pub use options::{Deadline, QuoteOptions, SwapOptions, DEFAULT_DEADLINE_TTL};
pub use quoter::SwapQuoter;
pub use swap_router::{EncodedSwaps, SwapRouter};
