//! Notification adapters.
//!
//! Implements the `port::NotificationSink` trait for messaging backends.

#[cfg(feature = "telegram")]
pub mod telegram;
