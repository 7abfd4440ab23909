//! Order fixture files for the command-line front end.
//!
//! A fixture describes the orders a refund runs against and the refund rows
//! to apply:
//!
//! ```toml
//! [[orders]]
//! reference = "bob_order"
//! shipping_cost = "7.00"
//! discounts = "4.00"
//!
//! [[orders.products]]
//! order_detail_id = 1
//! name = "T-Shirt"
//! quantity = 2
//! unit_price = "10.00"
//!
//! [[refunds]]
//! product_name = "T-Shirt"
//! quantity = 1
//! amount = "10.00"
//! ```
//!
//! Amounts are best written as strings so their scale survives parsing.

use std::collections::BTreeSet;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use ortho_config::toml;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::FixtureError;
use crate::ledger::{InMemoryOrderBook, NewOrder};
use crate::order::{OrderDetailId, OrderProduct};
use crate::refund::RefundLineRequest;
use crate::storage::SharedStorage;

/// Parsed contents of a fixture file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Fixture {
    /// Orders to register, in file order.
    #[serde(default)]
    pub orders: Vec<OrderFixture>,
    /// Refund rows, in file order.
    #[serde(default)]
    pub refunds: Vec<RefundLineRequest>,
}

/// One order in a fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderFixture {
    /// Reference the order is stored under.
    pub reference: String,
    /// Shipping cost, tax included.
    #[serde(default)]
    pub shipping_cost: Decimal,
    /// Discounts applied to the order, tax included.
    #[serde(default)]
    pub discounts: Decimal,
    /// Product lines.
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

/// One product line in a fixture order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductFixture {
    /// Line identifier.
    pub order_detail_id: OrderDetailId,
    /// Product display name.
    pub name: String,
    /// Quantity ordered.
    pub quantity: u32,
    /// Quantity refunded before this fixture was loaded.
    #[serde(default)]
    pub refunded_quantity: u32,
    /// Unit price, tax included.
    pub unit_price: Decimal,
}

impl From<ProductFixture> for OrderProduct {
    fn from(product: ProductFixture) -> Self {
        Self {
            order_detail_id: product.order_detail_id,
            name: product.name,
            quantity: product.quantity,
            refunded_quantity: product.refunded_quantity,
            unit_price_tax_incl: product.unit_price,
        }
    }
}

/// An order book seeded from a fixture, with its references and refund rows.
#[derive(Debug, Default)]
pub struct FixtureSession {
    /// The order book holding every fixture order.
    pub book: InMemoryOrderBook,
    /// Fixture references resolved to order ids.
    pub storage: SharedStorage,
    /// Refund rows from the fixture.
    pub refunds: Vec<RefundLineRequest>,
}

impl Fixture {
    /// Parses fixture TOML.
    ///
    /// `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ParseFailed`] if `content` is not a valid
    /// fixture.
    pub fn parse(content: &str, path: &str) -> Result<Self, FixtureError> {
        toml::from_str(content).map_err(|e| FixtureError::ParseFailed {
            path: path.to_owned(),
            message: e.to_string(),
        })
    }

    /// Registers every order with a fresh order book.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::DuplicateReference`] if two orders share a
    /// reference and [`FixtureError::DuplicateOrderDetail`] if two lines of
    /// one order share an order detail id.
    pub fn into_session(self) -> Result<FixtureSession, FixtureError> {
        let mut session = FixtureSession {
            refunds: self.refunds,
            ..FixtureSession::default()
        };

        for order in self.orders {
            if session.storage.contains(&order.reference) {
                return Err(FixtureError::DuplicateReference {
                    reference: order.reference,
                });
            }
            let mut detail_ids = BTreeSet::new();
            if let Some(duplicate) = order
                .products
                .iter()
                .map(|product| product.order_detail_id)
                .find(|id| !detail_ids.insert(*id))
            {
                return Err(FixtureError::DuplicateOrderDetail {
                    reference: order.reference,
                    order_detail_id: duplicate,
                });
            }
            let order_id = session.book.add_order(NewOrder {
                products: order.products.into_iter().map(OrderProduct::from).collect(),
                shipping_cost_tax_incl: order.shipping_cost,
                discounts_tax_incl: order.discounts,
            });
            debug!(reference = %order.reference, %order_id, "seeded fixture order");
            session.storage.insert(order.reference, order_id);
        }

        Ok(session)
    }
}

/// Reads and parses a fixture file.
///
/// # Errors
///
/// Returns [`FixtureError::ReadFailed`] if the file cannot be opened and
/// [`FixtureError::ParseFailed`] if it is not a valid fixture.
pub fn load_fixture(path: &Utf8Path) -> Result<Fixture, FixtureError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path.file_name().unwrap_or(path.as_str());

    let read_failed = |e: std::io::Error| FixtureError::ReadFailed {
        path: path.to_string(),
        message: e.to_string(),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_failed)?;
    let content = dir.read_to_string(file_name).map_err(read_failed)?;

    Fixture::parse(&content, path.as_str())
}
