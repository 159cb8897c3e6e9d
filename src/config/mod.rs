//! Pool snapshot configurations and router addressing.
//!
//! [`PoolConfig`] is the top-level declarative snapshot for creating any
//! pool model, with one struct per model.  [`RouterConfig`] carries the
//! chain id and module addresses the call builders target.

mod concentrated;
mod constant_product;
mod pool_config;
mod router_config;

pub use concentrated::ConcentratedConfig;
pub use constant_product::ConstantProductConfig;
pub use pool_config::PoolConfig;
pub use router_config::RouterConfig;
