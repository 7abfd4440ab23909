//! Configuration data types for order-refund.

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use crate::error::ConfigError;
use crate::refund::{SHIPPING_REFUND_LINE, VoucherRefundType};

/// Log filter used when neither `RUST_LOG` nor `log_filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Refund building configuration.
#[derive(Debug, Clone, PartialEq, Eq, SmartDefault, Deserialize, Serialize)]
#[serde(default)]
pub struct RefundConfig {
    /// Product name that marks a refund row as the shipping refund.
    #[default(_code = "SHIPPING_REFUND_LINE.to_owned()")]
    pub shipping_line_name: String,

    /// Voucher refund type used when a command does not choose one.
    pub voucher_refund_type: VoucherRefundType,
}

impl RefundConfig {
    /// Validates the refund settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the shipping line name is empty
    /// or only whitespace, since no refund row could then be told apart from
    /// a product row by name.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.shipping_line_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: String::from("refund.shipping_line_name"),
                reason: String::from("cannot be empty"),
            }
            .into());
        }
        Ok(())
    }
}

/// Root application configuration.
///
/// This structure is loaded from configuration files, environment variables,
/// and command-line arguments with layered precedence. The precedence order
/// (lowest to highest) is: defaults, configuration file, environment variables,
/// command-line arguments.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `ORDER_REFUND_CONFIG_PATH` environment variable
/// 2. `.order-refund.toml` in the current working directory
/// 3. `.order-refund.toml` in the home directory
/// 4. `~/.config/order-refund/config.toml` (XDG default)
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "ORDER_REFUND",
    discovery(
        app_name = "order-refund",
        env_var = "ORDER_REFUND_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".order-refund.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct AppConfig {
    /// `tracing` filter directives for the binary's log output.
    pub log_filter: Option<String>,

    /// Path to the order fixture file.
    pub fixture: Option<String>,

    /// Refund building configuration.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub refund: RefundConfig,
}

impl AppConfig {
    /// Returns the configured log filter, or [`DEFAULT_LOG_FILTER`].
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
