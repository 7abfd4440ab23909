//! Semantic error types for the order-refund library.
//!
//! Errors fall into two families. Input-resolution errors
//! ([`RefundInputError`]) mean the refund rows could not be mapped onto the
//! order and are raised before anything is dispatched. Domain errors
//! ([`DomainError`]) come back from the command or query bus and are forwarded
//! to the caller unchanged. Opaque reporting (`eyre::Report`) is reserved for
//! the binary boundary.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::order::{OrderDetailId, OrderId};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A required configuration value is missing.
    #[error("missing required configuration: {field}")]
    MissingRequired {
        /// The name of the missing field.
        field: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error during configuration loading.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors raised while loading an order fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("failed to read fixture '{path}': {message}")]
    ReadFailed {
        /// The path of the fixture file.
        path: String,
        /// A description of the I/O failure.
        message: String,
    },

    /// The fixture file is not valid TOML or does not match the fixture layout.
    #[error("failed to parse fixture '{path}': {message}")]
    ParseFailed {
        /// The path of the fixture file.
        path: String,
        /// A description of the parse failure.
        message: String,
    },

    /// Two orders in the fixture share the same reference.
    #[error("duplicate order reference in fixture: {reference}")]
    DuplicateReference {
        /// The repeated reference.
        reference: String,
    },

    /// Two product lines of one fixture order share an order detail id.
    #[error("duplicate order detail {order_detail_id} in fixture order {reference}")]
    DuplicateOrderDetail {
        /// The reference of the order holding both lines.
        reference: String,
        /// The repeated line identifier.
        order_detail_id: OrderDetailId,
    },
}

/// Errors raised while resolving refund rows against an order snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefundInputError {
    /// A refund row names a product that is not on the order.
    #[error("Product {product_name} not found in orders products")]
    ProductNotFound {
        /// The display name that failed to match.
        product_name: String,
    },
}

/// The kind of a rejected refund, as reported by the refund command handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidRefundKind {
    /// A requested quantity is not a valid refund quantity.
    InvalidQuantity,
    /// A requested quantity exceeds what is left to refund on the line.
    QuantityTooHigh {
        /// The largest quantity that can still be refunded.
        refundable_quantity: u32,
    },
    /// A requested amount is negative, zero, or above the refundable balance.
    InvalidAmount,
    /// Neither a credit slip nor a voucher was requested.
    NoGeneration,
    /// The request refunds nothing.
    NoRefunds,
}

/// A refund rejected by domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct InvalidRefundError {
    kind: InvalidRefundKind,
}

impl InvalidRefundError {
    /// Creates an error of the given kind.
    #[must_use]
    pub const fn new(kind: InvalidRefundKind) -> Self {
        Self { kind }
    }

    /// Returns the rejection kind.
    #[must_use]
    pub const fn kind(&self) -> InvalidRefundKind {
        self.kind
    }

    /// Returns the refundable quantity carried by `QuantityTooHigh`.
    #[must_use]
    pub const fn refundable_quantity(&self) -> Option<u32> {
        match self.kind {
            InvalidRefundKind::QuantityTooHigh {
                refundable_quantity,
            } => Some(refundable_quantity),
            _ => None,
        }
    }
}

impl fmt::Display for InvalidRefundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuantity => f.write_str("invalid refund quantity"),
            Self::QuantityTooHigh {
                refundable_quantity,
            } => write!(
                f,
                "refund quantity too high, at most {refundable_quantity} can be refunded"
            ),
            Self::InvalidAmount => f.write_str("invalid refund amount"),
            Self::NoGeneration => f.write_str("refund must generate a credit slip or a voucher"),
            Self::NoRefunds => f.write_str("refund contains no refunded lines"),
        }
    }
}

/// Errors about orders themselves rather than the refund being requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// No order exists with this identifier.
    #[error("order {order_id} not found")]
    OrderNotFound {
        /// The unknown order identifier.
        order_id: OrderId,
    },

    /// The order has no line with this identifier.
    #[error("order detail {order_detail_id} not found on order {order_id}")]
    OrderDetailNotFound {
        /// The order being refunded.
        order_id: OrderId,
        /// The unknown order detail identifier.
        order_detail_id: OrderDetailId,
    },
}

/// Errors surfaced by the command and query buses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The refund was rejected by validation.
    #[error(transparent)]
    InvalidRefund(#[from] InvalidRefundError),

    /// The order or one of its lines could not be found.
    #[error(transparent)]
    Order(#[from] OrderError),
}

impl DomainError {
    /// Returns the refund rejection, if this is one.
    #[must_use]
    pub const fn as_invalid_refund(&self) -> Option<&InvalidRefundError> {
        match self {
            Self::InvalidRefund(error) => Some(error),
            Self::Order(_) => None,
        }
    }
}

/// Errors raised by the reference storage that maps scenario names to orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Nothing was stored under this reference.
    #[error("no order stored under reference '{reference}'")]
    ReferenceNotFound {
        /// The unknown reference.
        reference: String,
    },
}

/// Errors raised when read-back state does not match an expectation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The order carries a different number of credit slips.
    #[error(
        "Invalid number of credit slips on order {reference}, expected {expected} but got {actual}"
    )]
    CreditSlipCount {
        /// The reference of the inspected order.
        reference: String,
        /// The expected number of credit slips.
        expected: usize,
        /// The actual number of credit slips.
        actual: usize,
    },

    /// The order has no credit slip to inspect.
    #[error("order {order_id} has no credit slip")]
    NoCreditSlip {
        /// The inspected order.
        order_id: OrderId,
    },

    /// A credit slip field name is not recognised.
    #[error("unknown credit slip field '{field}'")]
    UnknownField {
        /// The unrecognised field name.
        field: String,
    },

    /// A credit slip field carries a different value.
    #[error("Invalid order slip field {field}, expected {expected} instead of {actual}")]
    FieldMismatch {
        /// The compared field name.
        field: String,
        /// The expected value.
        expected: Decimal,
        /// The actual value.
        actual: Decimal,
    },
}

/// Top-level error type for the order-refund library.
///
/// At the binary boundary these errors are converted to `eyre::Report` for
/// human-readable reporting.
#[derive(Debug, Error)]
pub enum OrderRefundError {
    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An order fixture could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Refund rows could not be resolved against the order.
    #[error(transparent)]
    Input(#[from] RefundInputError),

    /// The command or query bus rejected the operation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A scenario reference could not be resolved.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Read-back state did not match an expectation.
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl From<InvalidRefundError> for OrderRefundError {
    fn from(error: InvalidRefundError) -> Self {
        Self::Domain(DomainError::InvalidRefund(error))
    }
}

impl From<OrderError> for OrderRefundError {
    fn from(error: OrderError) -> Self {
        Self::Domain(DomainError::Order(error))
    }
}

impl OrderRefundError {
    /// Returns the refund rejection carried by this error, if any.
    #[must_use]
    pub const fn as_invalid_refund(&self) -> Option<&InvalidRefundError> {
        match self {
            Self::Domain(domain) => domain.as_invalid_refund(),
            _ => None,
        }
    }
}

/// A specialised `Result` type for order-refund operations.
pub type Result<T> = std::result::Result<T, OrderRefundError>;
