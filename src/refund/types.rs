//! Refund request data types.

use std::collections::BTreeMap;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::{OrderDetailId, OrderId};

/// Product name that marks a refund row as the shipping refund.
pub const SHIPPING_REFUND_LINE: &str = "shipping_refund";

/// One requested refund row, identified by product display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundLineRequest {
    /// Display name of the refunded product, or the shipping line name.
    pub product_name: String,
    /// Quantity to refund, as given. Ignored for the shipping line.
    ///
    /// The order book rejects a quantity that is not positive.
    #[serde(default)]
    pub quantity: i64,
    /// Amount to refund, tax included.
    pub amount: Decimal,
}

impl RefundLineRequest {
    /// Creates a refund row.
    #[must_use]
    pub fn new(product_name: impl Into<String>, quantity: i64, amount: Decimal) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            amount,
        }
    }

    /// Creates a shipping refund row using the default shipping line name.
    #[must_use]
    pub fn shipping(amount: Decimal) -> Self {
        Self::new(SHIPPING_REFUND_LINE, 0, amount)
    }
}

/// Refund of one order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRefund {
    /// Quantity to refund.
    pub quantity: i64,
    /// Amount to refund, tax included.
    pub amount: Decimal,
}

/// How the value of a refund voucher is computed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum VoucherRefundType {
    /// The voucher is worth the refunded product prices.
    ProductPrices,
    /// The voucher is worth the refunded product prices minus the discounts
    /// already applied to the order.
    #[default]
    ProductPricesExcludingVoucher,
    /// The voucher is worth an explicit amount.
    SpecificAmount,
}

/// What the refund should produce besides the refund itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundFlags {
    /// Return refunded quantities to sellable stock.
    pub restock: bool,
    /// Issue a credit slip.
    pub generate_credit_slip: bool,
    /// Issue a voucher.
    pub generate_voucher: bool,
}

impl RefundFlags {
    /// Creates the flag set.
    #[must_use]
    pub const fn new(restock: bool, generate_credit_slip: bool, generate_voucher: bool) -> Self {
        Self {
            restock,
            generate_credit_slip,
            generate_voucher,
        }
    }
}

/// A partial refund command ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialRefundRequest {
    /// The refunded order.
    pub order_id: OrderId,
    /// Per-line refunds keyed by order detail.
    pub line_refunds: BTreeMap<OrderDetailId, OrderLineRefund>,
    /// Shipping amount to refund.
    pub shipping_refund_amount: Decimal,
    /// Return refunded quantities to stock.
    pub restock: bool,
    /// Issue a credit slip.
    pub generate_credit_slip: bool,
    /// Issue a voucher.
    pub generate_voucher: bool,
    /// How the voucher value is computed.
    pub voucher_refund_type: VoucherRefundType,
    /// Explicit voucher value, used with [`VoucherRefundType::SpecificAmount`].
    pub voucher_refund_amount: Option<Decimal>,
}

impl PartialRefundRequest {
    /// Returns the flags this request was built with.
    #[must_use]
    pub const fn flags(&self) -> RefundFlags {
        RefundFlags::new(
            self.restock,
            self.generate_credit_slip,
            self.generate_voucher,
        )
    }

    /// Returns the sum of the line refund amounts.
    #[must_use]
    pub fn products_amount(&self) -> Decimal {
        self.line_refunds.values().map(|line| line.amount).sum()
    }

    /// Returns whether the request refunds anything at all.
    #[must_use]
    pub fn has_refunds(&self) -> bool {
        !self.line_refunds.is_empty() || !self.shipping_refund_amount.is_zero()
    }
}
