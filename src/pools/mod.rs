//! Pool models and the [`Pool`] dispatch enum.
//!
//! Every model implements [`SwapPool`](crate::traits::SwapPool).  The
//! [`Pool`] enum provides static dispatch across both, allowing
//! heterogeneous routes without `dyn` trait objects.
//!
//! # Pool Types
//!
//! | Pool | Pricing | Style |
//! |------|---------|-------|
//! | [`Pair`] | `x · y = k`, 0.3% fee | Uniswap V2 |
//! | [`ConcentratedPool`] | Q64.96 sqrt price over initialized ticks | Uniswap V3 |

mod concentrated;
pub mod pair;
mod pool;
mod tick_list;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use concentrated::ConcentratedPool;
pub use pair::Pair;
pub use pool::{Pool, PoolKey};
pub use tick_list::TickList;
