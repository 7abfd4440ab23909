//! `order-refund` application entry point.
//!
//! This binary builds and issues partial refunds against orders described in
//! a fixture file. It uses `eyre` for opaque error handling at the application
//! boundary, converting domain-specific errors into human-readable reports.
//!
//! Configuration is loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`~/.config/order-refund/config.toml` or path from
//!    `ORDER_REFUND_CONFIG_PATH`)
//! 3. Environment variables (`ORDER_REFUND_*`)
//! 4. Command-line arguments

use camino::Utf8Path;
use clap::Parser;
use eyre::{Report, Result as EyreResult};
use order_refund::api::{IssueRefundParams, RefundOptions, issue_partial_refund, plan_partial_refund};
use order_refund::bus::CreditSlipReader;
use order_refund::config::{AppConfig, Cli, Commands, RefundArgs, load_config};
use order_refund::error::{ConfigError, Result as RefundResult};
use order_refund::fixture::{FixtureSession, load_fixture};
use order_refund::order::{CreditSlip, Voucher};
use order_refund::refund::PartialRefundRequest;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Documents issued by the `issue` subcommand.
#[derive(Debug, Serialize)]
struct IssueReport {
    request: PartialRefundRequest,
    credit_slips: Vec<CreditSlip>,
    vouchers: Vec<Voucher>,
}

/// Output of a subcommand, printed as JSON.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Output {
    Plan(PartialRefundRequest),
    Issue(IssueReport),
}

/// Application entry point.
///
/// Loads configuration with layered precedence via `OrthoConfig`, installs
/// the log subscriber, then dispatches to the subcommand handler.
fn main() -> EyreResult<()> {
    let cli = Cli::parse();
    let config = load_config(&cli).map_err(Report::from)?;
    init_tracing(&config);

    let output = run(&cli, &config).map_err(Report::from)?;
    print_json(&output)
}

/// Installs a stderr `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over the configured `log_filter`.
fn init_tracing(config: &AppConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Execute the CLI command, returning domain-specific errors.
///
/// Keeps semantic errors inside the run loop so the CLI boundary owns
/// conversion to `eyre::Report`.
fn run(cli: &Cli, config: &AppConfig) -> RefundResult<Output> {
    match &cli.command {
        Commands::Plan(args) => plan(config, args).map(Output::Plan),
        Commands::Issue(args) => issue(config, args).map(Output::Issue),
    }
}

/// Build the refund request without dispatching it.
fn plan(config: &AppConfig, args: &RefundArgs) -> RefundResult<PartialRefundRequest> {
    let session = open_session(config)?;
    let order_id = session.storage.get(&args.order)?;
    plan_partial_refund(
        &session.book,
        order_id,
        &session.refunds,
        &refund_options(config, args),
    )
}

/// Build and dispatch the refund, then collect the issued documents.
fn issue(config: &AppConfig, args: &RefundArgs) -> RefundResult<IssueReport> {
    let session = open_session(config)?;
    let request = issue_partial_refund(IssueRefundParams {
        storage: &session.storage,
        order_reference: &args.order,
        rows: &session.refunds,
        options: refund_options(config, args),
        queries: &session.book,
        commands: &session.book,
    })?;

    let credit_slips = session.book.credit_slips(request.order_id)?;
    let vouchers = session.book.vouchers(request.order_id)?;
    Ok(IssueReport {
        request,
        credit_slips,
        vouchers,
    })
}

fn open_session(config: &AppConfig) -> RefundResult<FixtureSession> {
    let path = config
        .fixture
        .as_deref()
        .ok_or_else(|| ConfigError::MissingRequired {
            field: String::from("fixture"),
        })?;
    let session = load_fixture(Utf8Path::new(path))?.into_session()?;
    Ok(session)
}

/// Command-line voucher settings win over the configured voucher type.
fn refund_options<'a>(config: &'a AppConfig, args: &RefundArgs) -> RefundOptions<'a> {
    let voucher_type = args
        .voucher_type
        .unwrap_or(config.refund.voucher_refund_type);
    RefundOptions::from_config(&config.refund, args.flags())
        .with_voucher(voucher_type, args.voucher_amount)
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_json(output: &Output) -> EyreResult<()> {
    let json = ortho_config::serde_json::to_string_pretty(output)?;
    println!("{json}");
    Ok(())
}
