//! In-memory order book implementing the order buses.
//!
//! [`InMemoryOrderBook`] holds orders for the lifetime of a scenario or a CLI
//! invocation. It answers snapshot queries, applies partial refunds with the
//! same validation taxonomy as the production handler, and records the credit
//! slips, vouchers and restocked quantities a refund produces. A rejected
//! refund leaves the order exactly as it was.

mod validation;

use std::cell::RefCell;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::bus::{CreditSlipReader, OrderQueryBus, RefundCommandBus};
use crate::error::{DomainError, OrderError};
use crate::order::{CreditSlip, OrderDetailId, OrderId, OrderProduct, OrderSnapshot, Voucher};
use crate::refund::PartialRefundRequest;
use validation::{RefundTotals, validate_refund};

/// An order to register with the order book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrder {
    /// Product lines in display order.
    pub products: Vec<OrderProduct>,
    /// Shipping cost, tax included.
    pub shipping_cost_tax_incl: Decimal,
    /// Discounts applied to the order, tax included.
    pub discounts_tax_incl: Decimal,
}

#[derive(Debug, Clone)]
struct OrderRecord {
    order_id: OrderId,
    products: Vec<OrderProduct>,
    shipping_cost_tax_incl: Decimal,
    shipping_refunded: Decimal,
    discounts_tax_incl: Decimal,
    restocked: BTreeMap<OrderDetailId, u32>,
    credit_slips: Vec<CreditSlip>,
    vouchers: Vec<Voucher>,
}

impl OrderRecord {
    fn refundable_shipping(&self) -> Decimal {
        (self.shipping_cost_tax_incl - self.shipping_refunded).max(Decimal::ZERO)
    }

    fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            order_id: self.order_id,
            products: self.products.clone(),
        }
    }

    fn apply(&mut self, request: &PartialRefundRequest, totals: RefundTotals) {
        for (order_detail_id, line) in &request.line_refunds {
            // Validation bounds the quantity by the line's refundable remainder.
            let quantity = u32::try_from(line.quantity).unwrap_or(0);
            if let Some(product) = self
                .products
                .iter_mut()
                .find(|product| product.order_detail_id == *order_detail_id)
            {
                product.refunded_quantity = product.refunded_quantity.saturating_add(quantity);
            }
            if request.restock {
                let restocked = self.restocked.entry(*order_detail_id).or_insert(0);
                *restocked = restocked.saturating_add(quantity);
            }
        }
        self.shipping_refunded += totals.shipping;

        if request.generate_credit_slip {
            let id = u64::try_from(self.credit_slips.len()).map_or(u64::MAX, |n| n.saturating_add(1));
            self.credit_slips.push(CreditSlip {
                id,
                order_id: self.order_id,
                amount: totals.total(),
                shipping_cost_amount: totals.shipping,
                total_products_tax_incl: totals.products,
                total_shipping_tax_incl: totals.shipping,
                partial: true,
            });
        }
        if let Some(amount) = totals.voucher {
            self.vouchers.push(Voucher {
                order_id: self.order_id,
                amount,
            });
        }
    }
}

/// Order book held in memory for a single thread of scenario execution.
#[derive(Debug, Default)]
pub struct InMemoryOrderBook {
    orders: RefCell<BTreeMap<OrderId, OrderRecord>>,
}

impl InMemoryOrderBook {
    /// Creates an empty order book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an order and returns its identifier.
    ///
    /// Identifiers are allocated sequentially from 1.
    pub fn add_order(&self, order: NewOrder) -> OrderId {
        let mut orders = self.orders.borrow_mut();
        let next = orders
            .keys()
            .next_back()
            .map_or(1, |last| last.get().saturating_add(1));
        let order_id = OrderId::new(next);
        orders.insert(
            order_id,
            OrderRecord {
                order_id,
                products: order.products,
                shipping_cost_tax_incl: order.shipping_cost_tax_incl,
                shipping_refunded: Decimal::ZERO,
                discounts_tax_incl: order.discounts_tax_incl,
                restocked: BTreeMap::new(),
                credit_slips: Vec::new(),
                vouchers: Vec::new(),
            },
        );
        debug!(%order_id, "registered order");
        order_id
    }

    /// Returns the quantity returned to stock for one order line.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::OrderNotFound`] for an unknown order.
    pub fn restocked_quantity(
        &self,
        order_id: OrderId,
        order_detail_id: OrderDetailId,
    ) -> Result<u32, DomainError> {
        self.with_order(order_id, |record| {
            record.restocked.get(&order_detail_id).copied().unwrap_or(0)
        })
    }

    /// Returns the vouchers generated for an order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::OrderNotFound`] for an unknown order.
    pub fn vouchers(&self, order_id: OrderId) -> Result<Vec<Voucher>, DomainError> {
        self.with_order(order_id, |record| record.vouchers.clone())
    }

    fn with_order<T>(
        &self,
        order_id: OrderId,
        read: impl FnOnce(&OrderRecord) -> T,
    ) -> Result<T, DomainError> {
        let orders = self.orders.borrow();
        let record = orders
            .get(&order_id)
            .ok_or(OrderError::OrderNotFound { order_id })?;
        Ok(read(record))
    }
}

impl OrderQueryBus for InMemoryOrderBook {
    fn fetch_order_snapshot(&self, order_id: OrderId) -> Result<OrderSnapshot, DomainError> {
        self.with_order(order_id, OrderRecord::snapshot)
    }
}

impl RefundCommandBus for InMemoryOrderBook {
    fn submit_partial_refund(&self, request: &PartialRefundRequest) -> Result<(), DomainError> {
        let order_id = request.order_id;
        let mut orders = self.orders.borrow_mut();
        let record = orders
            .get_mut(&order_id)
            .ok_or(OrderError::OrderNotFound { order_id })?;

        let totals = validate_refund(record, request).inspect_err(|error| {
            debug!(%order_id, %error, "partial refund rejected");
        })?;
        record.apply(request, totals);

        info!(
            %order_id,
            lines = request.line_refunds.len(),
            total = %totals.total(),
            credit_slip = request.generate_credit_slip,
            voucher = request.generate_voucher,
            "partial refund applied"
        );
        Ok(())
    }
}

impl CreditSlipReader for InMemoryOrderBook {
    fn credit_slips(&self, order_id: OrderId) -> Result<Vec<CreditSlip>, DomainError> {
        self.with_order(order_id, |record| record.credit_slips.clone())
    }
}
