//! Refund orchestration API.
//!
//! These functions hold the flow that scenario steps and the CLI share:
//! resolve an order reference, fetch the order snapshot, build the partial
//! refund request, and dispatch it. Inspection helpers in [`inspect`] read
//! back the credit slips a refund produced.
//!
//! All functions accept library-owned types and return
//! [`crate::error::Result`]. They do not print to stdout/stderr.

mod inspect;

pub use inspect::{
    credit_slip_count, last_credit_slip, verify_credit_slip_count, verify_last_credit_slip,
};

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::bus::{OrderQueryBus, RefundCommandBus};
use crate::config::RefundConfig;
use crate::error::Result as RefundResult;
use crate::order::OrderId;
use crate::refund::{
    PartialRefundRequest, RefundFlags, RefundLineRequest, RefundRequestBuilder,
    SHIPPING_REFUND_LINE, VoucherRefundType,
};
use crate::storage::SharedStorage;

/// Settings applied when building a refund request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundOptions<'a> {
    /// Restock, credit slip and voucher flags.
    pub flags: RefundFlags,
    /// Product name that marks the shipping refund row.
    pub shipping_line_name: &'a str,
    /// How the voucher value is computed.
    pub voucher_refund_type: VoucherRefundType,
    /// Explicit voucher value for [`VoucherRefundType::SpecificAmount`].
    pub voucher_refund_amount: Option<Decimal>,
}

impl<'a> RefundOptions<'a> {
    /// Creates options with the default shipping line and voucher type.
    #[must_use]
    pub const fn new(flags: RefundFlags) -> Self {
        Self {
            flags,
            shipping_line_name: SHIPPING_REFUND_LINE,
            voucher_refund_type: VoucherRefundType::ProductPricesExcludingVoucher,
            voucher_refund_amount: None,
        }
    }

    /// Creates options whose shipping line and voucher type come from
    /// configuration.
    #[must_use]
    pub fn from_config(config: &'a RefundConfig, flags: RefundFlags) -> Self {
        Self {
            flags,
            shipping_line_name: &config.shipping_line_name,
            voucher_refund_type: config.voucher_refund_type,
            voucher_refund_amount: None,
        }
    }

    /// Replaces the voucher settings.
    #[must_use]
    pub const fn with_voucher(
        mut self,
        refund_type: VoucherRefundType,
        amount: Option<Decimal>,
    ) -> Self {
        self.voucher_refund_type = refund_type;
        self.voucher_refund_amount = amount;
        self
    }
}

/// Parameters for issuing a partial refund on a referenced order.
///
/// Groups the arguments required by [`issue_partial_refund`] into a single
/// struct to satisfy the "no more than four parameters" convention.
pub struct IssueRefundParams<'a, Q: OrderQueryBus, C: RefundCommandBus> {
    /// Scenario references to resolve `order_reference` against.
    pub storage: &'a SharedStorage,
    /// Human-readable reference of the refunded order.
    pub order_reference: &'a str,
    /// Refund rows in input order.
    pub rows: &'a [RefundLineRequest],
    /// Flags and voucher settings.
    pub options: RefundOptions<'a>,
    /// Query bus used to fetch the order snapshot.
    pub queries: &'a Q,
    /// Command bus the request is dispatched to.
    pub commands: &'a C,
}

/// Fetches the order snapshot and builds a refund request without
/// dispatching it.
///
/// # Errors
///
/// Returns `OrderRefundError` variants:
/// - `Domain` if the snapshot query fails.
/// - `Input` if a row names a product that is not on the order.
pub fn plan_partial_refund<Q: OrderQueryBus>(
    queries: &Q,
    order_id: OrderId,
    rows: &[RefundLineRequest],
    options: &RefundOptions<'_>,
) -> RefundResult<PartialRefundRequest> {
    let snapshot = queries.fetch_order_snapshot(order_id)?;
    let request = RefundRequestBuilder::new(&snapshot)
        .with_flags(options.flags)
        .with_shipping_line_name(options.shipping_line_name)
        .with_voucher(options.voucher_refund_type, options.voucher_refund_amount)
        .build(rows)?;
    Ok(request)
}

/// Issues a partial refund on the order stored under `order_reference`.
///
/// Returns the dispatched request so callers can inspect what was sent.
///
/// # Errors
///
/// Returns `OrderRefundError` variants:
/// - `Storage` if the reference is unknown.
/// - `Input` if a row names a product that is not on the order; nothing is
///   dispatched in that case.
/// - `Domain` if the query fails or the command handler rejects the refund.
///   The handler's error is returned unchanged.
pub fn issue_partial_refund<Q: OrderQueryBus, C: RefundCommandBus>(
    params: IssueRefundParams<'_, Q, C>,
) -> RefundResult<PartialRefundRequest> {
    let IssueRefundParams {
        storage,
        order_reference,
        rows,
        options,
        queries,
        commands,
    } = params;

    let order_id = storage.get(order_reference)?;
    debug!(reference = order_reference, %order_id, rows = rows.len(), "issuing partial refund");

    let request = plan_partial_refund(queries, order_id, rows, &options)?;
    commands.submit_partial_refund(&request)?;

    info!(reference = order_reference, %order_id, "partial refund issued");
    Ok(request)
}
