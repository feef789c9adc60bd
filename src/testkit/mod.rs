//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - Scripted [`TradeHistorySource`](crate::port::TradeHistorySource)
//!   that replays canned responses and records every query.
//! - [`sink`] - [`NotificationSink`](crate::port::NotificationSink) that records
//!   messages and can simulate delivery failures.
//! - [`domain`] - Builders for trade records.

pub mod domain;
pub mod sink;
pub mod source;
