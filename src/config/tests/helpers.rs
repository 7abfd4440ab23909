//! Shared fixtures and helper functions for config tests.

use crate::config::AppConfig;
use crate::refund::VoucherRefundType;
use ortho_config::MergeComposer;
use rstest::fixture;
use std::sync::Arc;

/// Fixture providing an `AppConfig` parsed from a full TOML example.
#[fixture]
pub fn app_config_from_full_toml() -> AppConfig {
    let toml = r#"
        log_filter = "order_refund=debug"
        fixture = "/srv/refunds/orders.toml"

        [refund]
        shipping_line_name = "Shipping"
        voucher_refund_type = "specific_amount"
    "#;

    toml::from_str(toml).expect("TOML parsing should succeed")
}

/// Fixture providing an `AppConfig` parsed from a minimal TOML example.
#[fixture]
pub fn app_config_from_partial_toml() -> AppConfig {
    let toml = r#"
        fixture = "orders.toml"
    "#;

    toml::from_str(toml).expect("TOML parsing should succeed")
}

/// Helper: Creates a `MergeComposer` with defaults layer already pushed.
pub fn create_composer_with_defaults() -> Result<MergeComposer, serde_json::Error> {
    let mut composer = MergeComposer::new();
    let defaults = ortho_config::serde_json::to_value(AppConfig::default())?;
    composer.push_defaults(defaults);
    Ok(composer)
}

/// Helper: Merges layers from a composer into `AppConfig`.
pub fn merge_config(composer: MergeComposer) -> Result<AppConfig, Arc<ortho_config::OrthoError>> {
    AppConfig::merge_from_layers(composer.layers())
}

/// Helper: Asserts that a config has all default values.
pub fn assert_config_has_defaults(config: &AppConfig) {
    assert!(config.log_filter.is_none(), "log_filter should be None");
    assert!(config.fixture.is_none(), "fixture should be None");
    assert_eq!(
        config.refund.shipping_line_name, "shipping_refund",
        "refund.shipping_line_name should be shipping_refund"
    );
    assert_eq!(
        config.refund.voucher_refund_type,
        VoucherRefundType::ProductPricesExcludingVoucher,
        "refund.voucher_refund_type should be ProductPricesExcludingVoucher"
    );
}

/// Helper: Creates a `MergeComposer` with defaults, file, and env layers for testing layer precedence.
pub fn create_composer_with_file_and_env() -> Result<MergeComposer, serde_json::Error> {
    use ortho_config::serde_json::json;

    let mut composer = create_composer_with_defaults()?;

    composer.push_file(
        json!({
            "fixture": "/from/file.toml",
            "log_filter": "warn"
        }),
        None,
    );

    composer.push_environment(json!({
        "fixture": "/from/env.toml"
    }));

    Ok(composer)
}
