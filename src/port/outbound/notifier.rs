//! Notification port.
//!
//! A sink delivers one already-formatted message per call and reports
//! whether it got through. Sinks never retry and never return an error:
//! a failed delivery is a [`Delivery`] with `delivered == false`, which
//! the caller logs and moves past.

use async_trait::async_trait;
use tracing::info;

/// Outcome of a single send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Whether the messaging service accepted the message.
    pub delivered: bool,
    /// Identifier assigned by the messaging service, when delivered.
    pub message_id: Option<String>,
    /// Failure description, when not delivered.
    pub error: Option<String>,
}

impl Delivery {
    /// A successful delivery.
    #[must_use]
    pub fn delivered(message_id: impl Into<String>) -> Self {
        Self {
            delivered: true,
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    /// A failed delivery with a reason.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            delivered: false,
            message_id: None,
            error: Some(reason.into()),
        }
    }
}

/// Trait for notification backends.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `text` is rich text (HTML subset) and may contain clickable links
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver `text` to `destination`.
    async fn send(&self, destination: &str, text: &str) -> Delivery;
}

/// A sink that only logs messages via tracing.
///
/// Used when no messaging backend is compiled in.
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn send(&self, destination: &str, text: &str) -> Delivery {
        info!(destination = %destination, text = %text, "Notification");
        Delivery {
            delivered: true,
            message_id: None,
            error: None,
        }
    }
}
