//! Checkout integration tests: processing checks against the catalog,
//! closing the day and dashboard totals.

mod end_of_day;
mod support;
mod transactions;
