//! Translation of refund rows into a [`PartialRefundRequest`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use super::types::{
    OrderLineRefund, PartialRefundRequest, RefundFlags, RefundLineRequest, SHIPPING_REFUND_LINE,
    VoucherRefundType,
};
use crate::error::RefundInputError;
use crate::order::OrderSnapshot;

/// Builds partial refund requests against one order snapshot.
///
/// Rows are resolved in input order. The shipping line sets the shipping
/// refund amount; every other row must name a product present on the
/// snapshot. A later row for the same order line replaces the earlier one.
///
/// # Example
///
/// ```
/// use order_refund::order::{OrderDetailId, OrderId, OrderProduct, OrderSnapshot};
/// use order_refund::refund::{RefundFlags, RefundLineRequest, RefundRequestBuilder};
/// use rust_decimal::Decimal;
///
/// let snapshot = OrderSnapshot {
///     order_id: OrderId::new(1),
///     products: vec![OrderProduct::new(
///         OrderDetailId::new(1),
///         "T-Shirt",
///         1,
///         Decimal::new(1000, 2),
///     )],
/// };
/// let rows = [RefundLineRequest::new("T-Shirt", 1, Decimal::new(1000, 2))];
///
/// let request = RefundRequestBuilder::new(&snapshot)
///     .with_flags(RefundFlags::new(true, true, false))
///     .build(&rows)
///     .expect("T-Shirt is on the order");
/// assert_eq!(request.line_refunds.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RefundRequestBuilder<'a> {
    snapshot: &'a OrderSnapshot,
    shipping_line_name: &'a str,
    flags: RefundFlags,
    voucher_refund_type: VoucherRefundType,
    voucher_refund_amount: Option<Decimal>,
}

impl<'a> RefundRequestBuilder<'a> {
    /// Creates a builder with no flags set and the default voucher type.
    #[must_use]
    pub fn new(snapshot: &'a OrderSnapshot) -> Self {
        Self {
            snapshot,
            shipping_line_name: SHIPPING_REFUND_LINE,
            flags: RefundFlags::default(),
            voucher_refund_type: VoucherRefundType::default(),
            voucher_refund_amount: None,
        }
    }

    /// Sets the restock, credit slip and voucher flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: RefundFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Overrides the product name that marks the shipping refund row.
    #[must_use]
    pub const fn with_shipping_line_name(mut self, name: &'a str) -> Self {
        self.shipping_line_name = name;
        self
    }

    /// Sets how the voucher value is computed.
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

    /// Resolves `rows` and assembles the refund request.
    ///
    /// # Errors
    ///
    /// Returns [`RefundInputError::ProductNotFound`] for the first row whose
    /// product name is neither the shipping line nor a product on the order.
    /// Rows after it are not examined.
    pub fn build(&self, rows: &[RefundLineRequest]) -> Result<PartialRefundRequest, RefundInputError> {
        let mut line_refunds = BTreeMap::new();
        let mut shipping_refund_amount = Decimal::ZERO;

        for row in rows {
            if row.product_name == self.shipping_line_name {
                shipping_refund_amount = row.amount;
                continue;
            }

            let product = self.snapshot.find_by_name(&row.product_name).ok_or_else(|| {
                RefundInputError::ProductNotFound {
                    product_name: row.product_name.clone(),
                }
            })?;

            let refund = OrderLineRefund {
                quantity: row.quantity,
                amount: row.amount,
            };
            if let Some(previous) = line_refunds.insert(product.order_detail_id, refund) {
                debug!(
                    order_detail_id = %product.order_detail_id,
                    product = %row.product_name,
                    previous_quantity = previous.quantity,
                    "refund row replaces an earlier row for the same order line"
                );
            }
        }

        debug!(
            order_id = %self.snapshot.order_id,
            lines = line_refunds.len(),
            shipping = %shipping_refund_amount,
            "built partial refund request"
        );

        Ok(PartialRefundRequest {
            order_id: self.snapshot.order_id,
            line_refunds,
            shipping_refund_amount,
            restock: self.flags.restock,
            generate_credit_slip: self.flags.generate_credit_slip,
            generate_voucher: self.flags.generate_voucher,
            voucher_refund_type: self.voucher_refund_type,
            voucher_refund_amount: self.voucher_refund_amount,
        })
    }
}
