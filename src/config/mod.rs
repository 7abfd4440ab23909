//! Configuration system for order-refund.
//!
//! This module provides the configuration structures and CLI definitions for
//! the order-refund application. Configuration loading and precedence merging
//! is handled by the `ortho_config` crate. Precedence: CLI flags override
//! environment variables, which override configuration files, which override
//! defaults.
//!
//! The configuration file is expected at `~/.config/order-refund/config.toml`
//! by default.
//!
//! # Example Configuration
//!
//! ```toml
//! log_filter = "order_refund=debug"
//! fixture = "/srv/refunds/orders.toml"
//!
//! [refund]
//! shipping_line_name = "shipping_refund"
//! voucher_refund_type = "product_prices_excluding_voucher"
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Cli, Commands, RefundArgs};
pub use loader::{env_var_names, load_config};
pub use types::{AppConfig, DEFAULT_LOG_FILTER, RefundConfig};
