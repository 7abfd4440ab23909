//! Given/when steps for partial order refund scenarios.

use std::collections::HashMap;
use std::str::FromStr;

use clap::ValueEnum;
use order_refund::api::{IssueRefundParams, RefundOptions, issue_partial_refund};
use order_refund::error::OrderRefundError;
use order_refund::ledger::NewOrder;
use order_refund::order::{OrderDetailId, OrderProduct};
use order_refund::refund::{RefundFlags, RefundLineRequest, VoucherRefundType};
use rstest_bdd_macros::{given, when};
use rust_decimal::Decimal;

use super::StepResult;
use super::state::{RefundOutcome, RefundScenarioState};

/// Maps each table row after the header to its column values.
pub(crate) fn column_hash(datatable: &[Vec<String>]) -> Vec<HashMap<&str, &str>> {
    let Some((header, rows)) = datatable.split_first() else {
        return Vec::new();
    };
    rows.iter()
        .map(|row| {
            header
                .iter()
                .map(|column| column.trim())
                .zip(row.iter().map(|value| value.trim()))
                .collect()
        })
        .collect()
}

pub(crate) fn cell<'a>(row: &HashMap<&str, &'a str>, column: &str) -> StepResult<&'a str> {
    row.get(column)
        .copied()
        .ok_or_else(|| format!("table row has no '{column}' column"))
}

pub(crate) fn parse_decimal(value: &str) -> StepResult<Decimal> {
    Decimal::from_str(value.trim()).map_err(|e| format!("invalid amount '{value}': {e}"))
}

fn parse_quantity<T>(value: &str) -> StepResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| format!("invalid quantity '{value}': {e}"))
}

fn with_or_without(value: &str) -> StepResult<bool> {
    match value {
        "with" => Ok(true),
        "without" => Ok(false),
        other => Err(format!("expected 'with' or 'without', got '{other}'")),
    }
}

#[given(
    "an order {reference:string} with shipping cost {shipping:string} and discounts {discounts:string} containing:"
)]
fn given_order(
    refund_state: &RefundScenarioState,
    reference: String,
    shipping: String,
    discounts: String,
    datatable: Vec<Vec<String>>,
) -> StepResult<()> {
    let products = (1_u64..)
        .zip(column_hash(&datatable))
        .map(|(detail, row)| -> StepResult<OrderProduct> {
            Ok(OrderProduct::new(
                OrderDetailId::new(detail),
                cell(&row, "name")?,
                parse_quantity(cell(&row, "quantity")?)?,
                parse_decimal(cell(&row, "unit_price")?)?,
            ))
        })
        .collect::<StepResult<Vec<_>>>()?;

    let book = refund_state.book()?;
    let order_id = book.add_order(NewOrder {
        products,
        shipping_cost_tax_incl: parse_decimal(&shipping)?,
        discounts_tax_incl: parse_decimal(&discounts)?,
    });

    let mut storage = refund_state.storage()?;
    storage.insert(reference, order_id);
    refund_state.storage.set(storage);
    Ok(())
}

#[given("the shipping refund line is named {name:string}")]
fn given_shipping_line_name(refund_state: &RefundScenarioState, name: String) {
    refund_state.shipping_line_name.set(name);
}

#[given("the voucher refund type is {voucher_type}")]
fn given_voucher_refund_type(
    refund_state: &RefundScenarioState,
    voucher_type: String,
) -> StepResult<()> {
    let refund_type = <VoucherRefundType as ValueEnum>::from_str(&voucher_type, false)
        .map_err(|e| format!("invalid voucher refund type '{voucher_type}': {e}"))?;
    refund_state.voucher_refund_type.set(refund_type);
    Ok(())
}

#[given("the voucher refund amount is {amount:string}")]
fn given_voucher_refund_amount(refund_state: &RefundScenarioState, amount: String) -> StepResult<()> {
    refund_state
        .voucher_refund_amount
        .set(parse_decimal(&amount)?);
    Ok(())
}

#[when(
    "I issue a partial refund on {reference:string} {restock} restock {credit_slip} credit slip {voucher} voucher on following products:"
)]
fn when_issue_partial_refund(
    refund_state: &RefundScenarioState,
    reference: String,
    restock: String,
    credit_slip: String,
    voucher: String,
    datatable: Vec<Vec<String>>,
) -> StepResult<()> {
    let flags = RefundFlags::new(
        with_or_without(&restock)?,
        with_or_without(&credit_slip)?,
        with_or_without(&voucher)?,
    );
    let rows = column_hash(&datatable)
        .iter()
        .map(|row| -> StepResult<RefundLineRequest> {
            Ok(RefundLineRequest::new(
                cell(row, "product_name")?,
                parse_quantity(cell(row, "quantity")?)?,
                parse_decimal(cell(row, "amount")?)?,
            ))
        })
        .collect::<StepResult<Vec<_>>>()?;

    let book = refund_state.book()?;
    let storage = refund_state.storage()?;
    let shipping_line_name = refund_state.shipping_line_name.get().unwrap_or_default();
    let options = RefundOptions {
        flags,
        shipping_line_name: &shipping_line_name,
        voucher_refund_type: refund_state.voucher_refund_type.get().unwrap_or_default(),
        voucher_refund_amount: refund_state.voucher_refund_amount.get(),
    };

    let result = issue_partial_refund(IssueRefundParams {
        storage: &storage,
        order_reference: &reference,
        rows: &rows,
        options,
        queries: &*book,
        commands: &*book,
    });

    match result {
        Ok(request) => refund_state.outcome.set(RefundOutcome::Accepted(request)),
        Err(OrderRefundError::Domain(error)) => {
            refund_state.outcome.set(RefundOutcome::Rejected(error));
        }
        Err(other) => return Err(format!("refund could not be issued: {other}")),
    }
    Ok(())
}
