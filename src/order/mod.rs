//! Order identifiers, snapshots, and refund documents.
//!
//! An [`OrderSnapshot`] is the read model returned by the order query bus. It
//! is immutable once fetched; refund building works over the snapshot it is
//! handed and never reloads it.

mod credit_slip;

pub use credit_slip::{CreditSlip, CreditSlipField, Voucher};

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Wraps a raw order identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a single line within an order.
///
/// Distinct from the product's display name, which is what refund rows use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderDetailId(u64);

impl OrderDetailId {
    /// Wraps a raw order detail identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderDetailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One product line as seen on an order snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProduct {
    /// The line identifier refunds are keyed by.
    pub order_detail_id: OrderDetailId,
    /// The product display name.
    pub name: String,
    /// Quantity ordered.
    pub quantity: u32,
    /// Quantity already refunded on earlier credit slips.
    #[serde(default)]
    pub refunded_quantity: u32,
    /// Unit price, tax included.
    pub unit_price_tax_incl: Decimal,
}

impl OrderProduct {
    /// Creates a line with nothing refunded yet.
    #[must_use]
    pub fn new(
        order_detail_id: OrderDetailId,
        name: impl Into<String>,
        quantity: u32,
        unit_price_tax_incl: Decimal,
    ) -> Self {
        Self {
            order_detail_id,
            name: name.into(),
            quantity,
            refunded_quantity: 0,
            unit_price_tax_incl,
        }
    }

    /// Returns the quantity that can still be refunded on this line.
    #[must_use]
    pub const fn refundable_quantity(&self) -> u32 {
        self.quantity.saturating_sub(self.refunded_quantity)
    }
}

/// The products of an order at the time it was queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// The order this snapshot describes.
    pub order_id: OrderId,
    /// Product lines in display order.
    pub products: Vec<OrderProduct>,
}

impl OrderSnapshot {
    /// Returns the first product whose display name equals `name` exactly.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&OrderProduct> {
        self.products.iter().find(|product| product.name == name)
    }
}
