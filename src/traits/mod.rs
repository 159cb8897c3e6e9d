//! Core trait abstractions for pool operations.
//!
//! [`SwapPool`] is the quoting capability every pool model provides, and
//! [`FromConfig`] is the configuration-driven constructor the factory
//! dispatches to.

mod from_config;
mod swap_pool;

pub use from_config::FromConfig;
pub use swap_pool::SwapPool;
