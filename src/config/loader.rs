//! Configuration loading with layered precedence.
//!
//! This module loads configuration with the precedence order (lowest to
//! highest): application defaults, configuration file, environment variables,
//! command-line arguments.
//!
//! Layers are composed manually with `MergeComposer` because the `Cli` struct
//! owns subcommand dispatch and the `--config` flag, while `AppConfig` only
//! holds configuration values. Discovery therefore has to honour the CLI path
//! before falling back to `ORDER_REFUND_CONFIG_PATH` and XDG locations.
//!
//! # Environment Variable Handling
//!
//! Typed fields fail fast: `ORDER_REFUND_REFUND_VOUCHER_REFUND_TYPE=sometimes`
//! returns an error immediately instead of silently falling back to the
//! default. String fields are always accepted.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::ValueEnum;
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};

use crate::config::{AppConfig, Cli};
use crate::error::{ConfigError, Result};
use crate::refund::VoucherRefundType;

// ============================================================================
// Environment Variable Specification Table
// ============================================================================

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// A voucher refund type name. Invalid names return an error.
    VoucherRefundType,
}

/// Specification for a single environment variable mapping.
struct EnvVarSpec {
    /// The environment variable name (e.g., `ORDER_REFUND_FIXTURE`).
    env_var: &'static str,
    /// The JSON path segments (e.g., `["refund", "shipping_line_name"]`).
    path: &'static [&'static str],
    /// The expected value type.
    var_type: EnvVarType,
}

/// Table of all environment variables and their JSON paths.
const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        env_var: "ORDER_REFUND_LOG_FILTER",
        path: &["log_filter"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "ORDER_REFUND_FIXTURE",
        path: &["fixture"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "ORDER_REFUND_REFUND_SHIPPING_LINE_NAME",
        path: &["refund", "shipping_line_name"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "ORDER_REFUND_REFUND_VOUCHER_REFUND_TYPE",
        path: &["refund", "voucher_refund_type"],
        var_type: EnvVarType::VoucherRefundType,
    },
];

/// Returns the list of environment variable names recognised by the config loader.
///
/// Tests use this to clear every `ORDER_REFUND_*` variable without keeping a
/// second hard-coded list in sync.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_VAR_SPECS.iter().map(|spec| spec.env_var).collect()
}

/// Load a configuration file and push it to the composer.
///
/// Opens the parent directory with `cap_std::fs_utf8` and reads the file from
/// there.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => current_dir.as_ref(),
    };
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    composer.push_file(value, Some(path.clone()));
    Ok(())
}

/// Load configuration with full layer precedence.
///
/// Sources, lowest precedence first:
/// 1. Application defaults defined in the struct
/// 2. Configuration file (`--config`, `ORDER_REFUND_CONFIG_PATH`, or discovery)
/// 3. Environment variables prefixed with `ORDER_REFUND_`
/// 4. Command-line arguments (from the provided `Cli`)
///
/// # Errors
///
/// Returns `ConfigError` if configuration loading fails due to:
/// - Malformed configuration files
/// - Invalid typed environment variable values
/// - An empty `refund.shipping_line_name` after merging
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut composer = MergeComposer::new();

    let defaults =
        serde_json::to_value(AppConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    let config_path: Option<Utf8PathBuf> =
        cli.config.clone().filter(|p| p.exists()).or_else(|| {
            let discovery = ConfigDiscovery::builder("order-refund")
                .env_var("ORDER_REFUND_CONFIG_PATH")
                .config_file_name("config.toml")
                .dotfile_name(".order-refund.toml")
                .build();
            discovery
                .candidates()
                .into_iter()
                .filter(|p| p.exists())
                .find_map(|p| Utf8PathBuf::try_from(p).ok())
        });

    if let Some(ref path) = config_path {
        load_config_file(path, &mut composer)?;
    }

    let env_values = collect_env_vars()?;
    if !env_values.is_null() {
        composer.push_environment(env_values);
    }

    let cli_overrides = build_cli_overrides(cli);
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let config =
        AppConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;
    config.refund.validate()?;

    Ok(config)
}

/// Collect `ORDER_REFUND_*` environment variables into a JSON value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a typed variable has an
/// unparseable value.
fn collect_env_vars() -> Result<Value> {
    let mut root = Map::new();

    for spec in ENV_VAR_SPECS {
        let Ok(raw_value) = std::env::var(spec.env_var) else {
            continue;
        };

        let json_value = match spec.var_type {
            EnvVarType::String => Value::String(raw_value),
            EnvVarType::VoucherRefundType => {
                if <VoucherRefundType as ValueEnum>::from_str(&raw_value, false).is_err() {
                    return Err(ConfigError::InvalidValue {
                        field: spec.env_var.to_owned(),
                        reason: format!(
                            "expected one of product_prices, product_prices_excluding_voucher, specific_amount; got '{raw_value}'"
                        ),
                    }
                    .into());
                }
                Value::String(raw_value)
            }
        };

        insert_at_path(&mut root, spec.path, json_value);
    }

    if root.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(root))
    }
}

/// Insert a value at a nested path in a JSON map.
///
/// For a path like `["refund", "shipping_line_name"]`, this creates the
/// intermediate `refund` object if needed and inserts the field within it.
fn insert_at_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((&field, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for &segment in parents {
        let entry = current
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(obj) = entry.as_object_mut() else {
            return;
        };
        current = obj;
    }

    current.insert(field.to_owned(), value);
}

/// Build a JSON value containing CLI overrides.
fn build_cli_overrides(cli: &Cli) -> serde_json::Value {
    let mut overrides = serde_json::Map::new();

    if let Some(ref fixture) = cli.fixture {
        overrides.insert(
            "fixture".to_owned(),
            serde_json::Value::String(fixture.to_string()),
        );
    }

    if let Some(ref filter) = cli.log_filter {
        overrides.insert(
            "log_filter".to_owned(),
            serde_json::Value::String(filter.clone()),
        );
    }

    if overrides.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::Value::Object(overrides)
    }
}
