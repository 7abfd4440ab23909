//! Scenario state for partial order refund behavioural tests.

use std::rc::Rc;

use order_refund::error::DomainError;
use order_refund::ledger::InMemoryOrderBook;
use order_refund::order::OrderId;
use order_refund::refund::{PartialRefundRequest, SHIPPING_REFUND_LINE, VoucherRefundType};
use order_refund::storage::SharedStorage;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use rust_decimal::Decimal;

use super::StepResult;

/// Outcome of the most recent refund attempt.
#[derive(Debug, Clone)]
pub(crate) enum RefundOutcome {
    /// The order book accepted the refund.
    Accepted(PartialRefundRequest),
    /// The order book rejected the refund.
    Rejected(DomainError),
}

#[derive(Default, ScenarioState)]
pub(crate) struct RefundScenarioState {
    pub(crate) book: Slot<Rc<InMemoryOrderBook>>,
    pub(crate) storage: Slot<SharedStorage>,
    pub(crate) shipping_line_name: Slot<String>,
    pub(crate) voucher_refund_type: Slot<VoucherRefundType>,
    pub(crate) voucher_refund_amount: Slot<Decimal>,
    pub(crate) outcome: Slot<RefundOutcome>,
}

impl RefundScenarioState {
    pub(crate) fn book(&self) -> StepResult<Rc<InMemoryOrderBook>> {
        self.book
            .get()
            .ok_or_else(|| String::from("order book should be initialised"))
    }

    pub(crate) fn storage(&self) -> StepResult<SharedStorage> {
        self.storage
            .get()
            .ok_or_else(|| String::from("storage should be initialised"))
    }

    pub(crate) fn order_id(&self, reference: &str) -> StepResult<OrderId> {
        self.storage()?.get(reference).map_err(|e| e.to_string())
    }

    pub(crate) fn outcome(&self) -> StepResult<RefundOutcome> {
        self.outcome
            .get()
            .ok_or_else(|| String::from("no refund has been issued"))
    }
}

#[fixture]
pub(crate) fn refund_state() -> RefundScenarioState {
    let state = RefundScenarioState::default();
    state.book.set(Rc::new(InMemoryOrderBook::new()));
    state.storage.set(SharedStorage::new());
    state
        .shipping_line_name
        .set(String::from(SHIPPING_REFUND_LINE));
    state.voucher_refund_type.set(VoucherRefundType::default());
    state
}
