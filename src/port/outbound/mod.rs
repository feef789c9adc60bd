//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the two infrastructure dependencies: the
//! trade-history API and the notification channel.

pub mod history;
pub mod notifier;
