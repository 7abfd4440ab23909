//! Seams to the order domain's query and command buses.
//!
//! The refund domain itself (refund calculation, credit slip generation,
//! quantity and amount validation) sits behind these traits. Calls are
//! synchronous request/response; timeouts and cancellation belong to the
//! implementation.

use crate::error::DomainError;
use crate::order::{CreditSlip, OrderId, OrderSnapshot};
use crate::refund::PartialRefundRequest;

/// Read access to the current state of an order.
#[cfg_attr(test, mockall::automock)]
pub trait OrderQueryBus {
    /// Fetches the order's products as they are at call time.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Order`] when the order does not exist.
    fn fetch_order_snapshot(&self, order_id: OrderId) -> Result<OrderSnapshot, DomainError>;
}

/// Submission of refund commands.
#[cfg_attr(test, mockall::automock)]
pub trait RefundCommandBus {
    /// Applies a partial refund.
    ///
    /// A rejected refund leaves the order untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRefund`] when validation rejects the
    /// request, or [`DomainError::Order`] when the order or one of its lines
    /// is unknown.
    fn submit_partial_refund(&self, request: &PartialRefundRequest) -> Result<(), DomainError>;
}

/// Read-back of the credit slips issued on an order.
#[cfg_attr(test, mockall::automock)]
pub trait CreditSlipReader {
    /// Returns the order's credit slips, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Order`] when the order does not exist.
    fn credit_slips(&self, order_id: OrderId) -> Result<Vec<CreditSlip>, DomainError>;
}
