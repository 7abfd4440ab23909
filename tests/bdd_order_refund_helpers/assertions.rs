//! Assertion helpers for partial order refund behavioural tests.

use order_refund::api::{verify_credit_slip_count, verify_last_credit_slip};
use order_refund::bus::OrderQueryBus;
use order_refund::error::InvalidRefundKind;
use rstest_bdd_macros::then;
use rust_decimal::Decimal;

use super::StepResult;
use super::state::{RefundOutcome, RefundScenarioState};
use super::steps::parse_decimal;

fn expect_rejection(
    refund_state: &RefundScenarioState,
    expected: InvalidRefundKind,
) -> StepResult<()> {
    match refund_state.outcome()? {
        RefundOutcome::Rejected(error) => match error.as_invalid_refund() {
            Some(invalid) if invalid.kind() == expected => Ok(()),
            Some(invalid) => Err(format!(
                "expected {expected:?}, got {:?}",
                invalid.kind()
            )),
            None => Err(format!("expected {expected:?}, got order error: {error}")),
        },
        RefundOutcome::Accepted(_) => Err(format!("expected {expected:?}, got an accepted refund")),
    }
}

#[then("the refund is accepted")]
fn refund_is_accepted(refund_state: &RefundScenarioState) -> StepResult<()> {
    match refund_state.outcome()? {
        RefundOutcome::Accepted(request) if request.has_refunds() => Ok(()),
        RefundOutcome::Accepted(request) => Err(format!(
            "accepted refund on order {} refunds nothing",
            request.order_id
        )),
        RefundOutcome::Rejected(error) => Err(format!("expected acceptance, got error: {error}")),
    }
}

#[then("I should get error that refund quantity is invalid")]
fn error_is_invalid_quantity(refund_state: &RefundScenarioState) -> StepResult<()> {
    expect_rejection(refund_state, InvalidRefundKind::InvalidQuantity)
}

#[then("I should get error that refund quantity is too high and max is {max_refund:u32}")]
fn error_is_quantity_too_high(
    refund_state: &RefundScenarioState,
    max_refund: u32,
) -> StepResult<()> {
    expect_rejection(
        refund_state,
        InvalidRefundKind::QuantityTooHigh {
            refundable_quantity: max_refund,
        },
    )
}

#[then("I should get error that refund amount is invalid")]
fn error_is_invalid_amount(refund_state: &RefundScenarioState) -> StepResult<()> {
    expect_rejection(refund_state, InvalidRefundKind::InvalidAmount)
}

#[then("I should get error that no generation is invalid")]
fn error_is_no_generation(refund_state: &RefundScenarioState) -> StepResult<()> {
    expect_rejection(refund_state, InvalidRefundKind::NoGeneration)
}

#[then("I should get error that no refunds is invalid")]
fn error_is_no_refunds(refund_state: &RefundScenarioState) -> StepResult<()> {
    expect_rejection(refund_state, InvalidRefundKind::NoRefunds)
}

#[then("{reference:string} has {count:u32} credit slips")]
fn order_has_credit_slips(
    refund_state: &RefundScenarioState,
    reference: String,
    count: u32,
) -> StepResult<()> {
    let book = refund_state.book()?;
    let order_id = refund_state.order_id(&reference)?;
    let expected = usize::try_from(count).map_err(|e| e.to_string())?;
    verify_credit_slip_count(&*book, &reference, order_id, expected).map_err(|e| e.to_string())
}

#[then("{reference:string} last credit slip is:")]
fn last_credit_slip_is(
    refund_state: &RefundScenarioState,
    reference: String,
    datatable: Vec<Vec<String>>,
) -> StepResult<()> {
    let expected_fields = datatable
        .iter()
        .map(|row| -> StepResult<(String, Decimal)> {
            match row.as_slice() {
                [field, value] => Ok((field.trim().to_owned(), parse_decimal(value)?)),
                _ => Err(format!("expected a field and a value, got {row:?}")),
            }
        })
        .collect::<StepResult<Vec<_>>>()?;

    let book = refund_state.book()?;
    let order_id = refund_state.order_id(&reference)?;
    verify_last_credit_slip(&*book, order_id, &expected_fields).map_err(|e| e.to_string())
}

#[then("{reference:string} has {quantity:u32} restocked {product:string}")]
fn order_has_restocked(
    refund_state: &RefundScenarioState,
    reference: String,
    quantity: u32,
    product: String,
) -> StepResult<()> {
    let book = refund_state.book()?;
    let order_id = refund_state.order_id(&reference)?;
    let snapshot = book
        .fetch_order_snapshot(order_id)
        .map_err(|e| e.to_string())?;
    let line = snapshot
        .find_by_name(&product)
        .ok_or_else(|| format!("product {product} is not on order {reference}"))?;
    let restocked = book
        .restocked_quantity(order_id, line.order_detail_id)
        .map_err(|e| e.to_string())?;

    if restocked == quantity {
        Ok(())
    } else {
        Err(format!(
            "expected {quantity} restocked {product}, got {restocked}"
        ))
    }
}

#[then("{reference:string} has a voucher worth {amount:string}")]
fn order_has_voucher(
    refund_state: &RefundScenarioState,
    reference: String,
    amount: String,
) -> StepResult<()> {
    let expected = parse_decimal(&amount)?;
    let book = refund_state.book()?;
    let order_id = refund_state.order_id(&reference)?;
    let vouchers = book.vouchers(order_id).map_err(|e| e.to_string())?;

    match vouchers.last() {
        Some(voucher) if voucher.amount == expected => Ok(()),
        Some(voucher) => Err(format!(
            "expected a voucher worth {expected}, got {}",
            voucher.amount
        )),
        None => Err(format!("order {reference} has no voucher")),
    }
}
