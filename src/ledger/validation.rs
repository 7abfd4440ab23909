//! Partial refund validation against an order record.

use rust_decimal::Decimal;

use super::OrderRecord;
use crate::error::{DomainError, InvalidRefundError, InvalidRefundKind, OrderError};
use crate::refund::{OrderLineRefund, PartialRefundRequest, VoucherRefundType};

/// Amounts a validated refund will record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RefundTotals {
    pub(super) products: Decimal,
    pub(super) shipping: Decimal,
    /// Positive voucher value, if a voucher is to be recorded.
    pub(super) voucher: Option<Decimal>,
}

impl RefundTotals {
    pub(super) fn total(&self) -> Decimal {
        self.products + self.shipping
    }
}

const fn reject(kind: InvalidRefundKind) -> DomainError {
    DomainError::InvalidRefund(InvalidRefundError::new(kind))
}

/// Checks `request` against `record` without mutating anything.
///
/// Checks run in a fixed order: generation, emptiness, each line in detail
/// order, shipping, then voucher.
pub(super) fn validate_refund(
    record: &OrderRecord,
    request: &PartialRefundRequest,
) -> Result<RefundTotals, DomainError> {
    if !request.generate_credit_slip && !request.generate_voucher {
        return Err(reject(InvalidRefundKind::NoGeneration));
    }
    if !request.has_refunds() {
        return Err(reject(InvalidRefundKind::NoRefunds));
    }

    for (order_detail_id, line) in &request.line_refunds {
        let product = record
            .products
            .iter()
            .find(|product| product.order_detail_id == *order_detail_id)
            .ok_or(OrderError::OrderDetailNotFound {
                order_id: record.order_id,
                order_detail_id: *order_detail_id,
            })?;
        validate_line(line, product.refundable_quantity(), product.unit_price_tax_incl)?;
    }

    let shipping = request.shipping_refund_amount;
    if shipping.is_sign_negative() || shipping > record.refundable_shipping() {
        return Err(reject(InvalidRefundKind::InvalidAmount));
    }

    let products = request.products_amount();
    // A voucher worth nothing is not recorded.
    let voucher = if request.generate_voucher {
        Some(voucher_amount(record, request, products + shipping)?).filter(|v| !v.is_zero())
    } else {
        None
    };

    Ok(RefundTotals {
        products,
        shipping,
        voucher,
    })
}

fn validate_line(
    line: &OrderLineRefund,
    refundable_quantity: u32,
    unit_price: Decimal,
) -> Result<(), DomainError> {
    if line.quantity <= 0 {
        return Err(reject(InvalidRefundKind::InvalidQuantity));
    }
    if line.quantity > i64::from(refundable_quantity) {
        return Err(reject(InvalidRefundKind::QuantityTooHigh {
            refundable_quantity,
        }));
    }
    let max_amount = unit_price.checked_mul(Decimal::from(line.quantity));
    if line.amount <= Decimal::ZERO || max_amount.is_none_or(|max| line.amount > max) {
        return Err(reject(InvalidRefundKind::InvalidAmount));
    }
    Ok(())
}

fn voucher_amount(
    record: &OrderRecord,
    request: &PartialRefundRequest,
    refunded: Decimal,
) -> Result<Decimal, DomainError> {
    match request.voucher_refund_type {
        VoucherRefundType::ProductPrices => Ok(refunded),
        VoucherRefundType::ProductPricesExcludingVoucher => {
            Ok((refunded - record.discounts_tax_incl).max(Decimal::ZERO))
        }
        VoucherRefundType::SpecificAmount => match request.voucher_refund_amount {
            Some(amount) if amount > Decimal::ZERO => Ok(amount),
            _ => Err(reject(InvalidRefundKind::InvalidAmount)),
        },
    }
}
