//! Partial refund request building for e-commerce order refunds.
//!
//! `order_refund` turns refund scenario rows (a product display name, a
//! quantity and an amount) into a [`refund::PartialRefundRequest`] keyed by
//! order detail, dispatches it over a command bus, and reads back the credit
//! slips the refund produced. Domain rejections from the command handler are
//! surfaced unchanged so callers can assert on the exact error kind.
//!
//! # Modules
//!
//! - [`refund`]: Refund request types and the request builder
//! - [`order`]: Order snapshots, credit slips and vouchers
//! - [`bus`]: Query, command and credit-slip reader seams
//! - [`ledger`]: In-memory order book implementing the bus seams
//! - [`storage`]: Scenario references to order ids
//! - [`api`]: Refund orchestration and credit-slip verification
//! - [`fixture`]: Order fixture files for the command-line front end
//! - [`config`]: Configuration system with layered precedence (CLI > env > file > defaults)
//! - [`error`]: Semantic error types for the application

pub mod api;
pub mod bus;
pub mod config;
pub mod error;
pub mod fixture;
pub mod ledger;
pub mod order;
pub mod refund;
pub mod storage;
