//! Command-line argument definitions for order-refund.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::refund::{RefundFlags, VoucherRefundType};

/// Command-line interface for order-refund.
#[derive(Debug, Parser)]
#[command(name = "order-refund")]
#[command(
    author,
    version,
    about = "Build and issue partial order refunds from a fixture file"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Path to the order fixture file.
    #[arg(long, global = true)]
    pub fixture: Option<Utf8PathBuf>,

    /// Log filter directives (overridden by `RUST_LOG`).
    #[arg(long, global = true)]
    pub log_filter: Option<String>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the partial refund request and print it without dispatching.
    Plan(RefundArgs),

    /// Build and apply the partial refund, then print the issued documents.
    Issue(RefundArgs),
}

/// Arguments shared by the `plan` and `issue` subcommands.
#[derive(Debug, Parser)]
pub struct RefundArgs {
    /// Reference of the refunded order in the fixture.
    #[arg(long, required = true)]
    pub order: String,

    /// Return refunded quantities to stock.
    #[arg(long)]
    pub restock: bool,

    /// Generate a credit slip.
    #[arg(long)]
    pub credit_slip: bool,

    /// Generate a voucher.
    #[arg(long)]
    pub voucher: bool,

    /// How the voucher value is computed (defaults to the configured type).
    #[arg(long, value_enum)]
    pub voucher_type: Option<VoucherRefundType>,

    /// Explicit voucher value, used with `specific_amount`.
    #[arg(long)]
    pub voucher_amount: Option<Decimal>,
}

impl RefundArgs {
    /// Returns the refund flags selected on the command line.
    #[must_use]
    pub const fn flags(&self) -> RefundFlags {
        RefundFlags::new(self.restock, self.credit_slip, self.voucher)
    }
}
