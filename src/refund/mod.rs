//! Partial refund request construction.
//!
//! Refund rows name products by display name, the way a scenario table does.
//! [`RefundRequestBuilder`] resolves those names against an order snapshot and
//! produces the [`PartialRefundRequest`] that the refund command handler
//! consumes. The special row named [`SHIPPING_REFUND_LINE`] carries the
//! shipping refund instead of a product line.

mod builder;
mod types;

pub use builder::RefundRequestBuilder;
pub use types::{
    OrderLineRefund, PartialRefundRequest, RefundFlags, RefundLineRequest, SHIPPING_REFUND_LINE,
    VoucherRefundType,
};
