//! Telegram notification delivery.
//!
//! Sends formatted order notifications to a chat or channel through the
//! Bot API.

pub mod notifier;

pub use notifier::{TelegramConfig, TelegramSink};
