//! Recording notification sink.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::port::{Delivery, NotificationSink};

/// A message captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub destination: String,
    pub text: String,
}

#[derive(Default)]
struct SinkState {
    sent: Vec<SentMessage>,
    failures_remaining: usize,
    always_fail: bool,
}

/// Thread-safe message collector for notification assertions in tests.
///
/// Every attempt is recorded, including the ones reported as failed.
#[derive(Clone, Default)]
pub struct RecordingSink {
    state: Arc<Mutex<SinkState>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the next `n` sends as undelivered.
    pub fn fail_next(&self, n: usize) {
        self.state.lock().failures_remaining = n;
    }

    /// Report every send as undelivered.
    pub fn fail_always(&self) {
        self.state.lock().always_fail = true;
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.state.lock().sent.clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.state
            .lock()
            .sent
            .iter()
            .map(|m| m.text.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.state.lock().sent.clear();
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, destination: &str, text: &str) -> Delivery {
        let mut state = self.state.lock();
        state.sent.push(SentMessage {
            destination: destination.to_string(),
            text: text.to_string(),
        });

        if state.always_fail {
            return Delivery::failed("scripted failure");
        }
        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            return Delivery::failed("scripted failure");
        }
        Delivery::delivered(state.sent.len().to_string())
    }
}
