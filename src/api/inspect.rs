//! Read-back of credit slips for refund verification.

use rust_decimal::Decimal;

use crate::bus::CreditSlipReader;
use crate::error::{Result as RefundResult, VerificationError};
use crate::order::{CreditSlip, CreditSlipField, OrderId};

/// Returns the number of credit slips issued on an order.
///
/// # Errors
///
/// Returns `OrderRefundError::Domain` if the order does not exist.
pub fn credit_slip_count<R: CreditSlipReader>(reader: &R, order_id: OrderId) -> RefundResult<usize> {
    Ok(reader.credit_slips(order_id)?.len())
}

/// Returns the most recent credit slip of an order.
///
/// # Errors
///
/// Returns `OrderRefundError` variants:
/// - `Domain` if the order does not exist.
/// - `Verification` if the order has no credit slip.
pub fn last_credit_slip<R: CreditSlipReader>(
    reader: &R,
    order_id: OrderId,
) -> RefundResult<CreditSlip> {
    let slip = reader
        .credit_slips(order_id)?
        .pop()
        .ok_or(VerificationError::NoCreditSlip { order_id })?;
    Ok(slip)
}

/// Checks that an order carries exactly `expected` credit slips.
///
/// `reference` is only used to word the error.
///
/// # Errors
///
/// Returns `OrderRefundError::Verification` with the actual count on a
/// mismatch, or `OrderRefundError::Domain` if the order does not exist.
pub fn verify_credit_slip_count<R: CreditSlipReader>(
    reader: &R,
    reference: &str,
    order_id: OrderId,
    expected: usize,
) -> RefundResult<()> {
    let actual = credit_slip_count(reader, order_id)?;
    if actual != expected {
        return Err(VerificationError::CreditSlipCount {
            reference: reference.to_owned(),
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}

/// Checks named fields of the most recent credit slip.
///
/// Values compare numerically, so `10` matches `10.00`.
///
/// # Errors
///
/// Returns `OrderRefundError::Verification` for the first unknown field or
/// mismatching value, or if the order has no credit slip.
pub fn verify_last_credit_slip<R: CreditSlipReader>(
    reader: &R,
    order_id: OrderId,
    expected_fields: &[(String, Decimal)],
) -> RefundResult<()> {
    let slip = last_credit_slip(reader, order_id)?;
    for (name, expected) in expected_fields {
        let field: CreditSlipField = name.parse()?;
        let actual = slip.field(field);
        if actual != *expected {
            return Err(VerificationError::FieldMismatch {
                field: name.clone(),
                expected: *expected,
                actual,
            }
            .into());
        }
    }
    Ok(())
}
