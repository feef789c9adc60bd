//! Lookback window selection for trade-history queries.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// A closed `[start, end]` range in epoch milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeWindow {
    /// The window of length `lookback` that ends at `now`.
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>, lookback: Duration) -> Self {
        let end_ms = now.timestamp_millis();
        let lookback_ms = i64::try_from(lookback.as_millis()).unwrap_or(i64::MAX);
        Self {
            start_ms: end_ms.saturating_sub(lookback_ms),
            end_ms,
        }
    }
}

/// Issues a fresh window per poll cycle.
///
/// The end of each window is clamped to the end of the previous one so a
/// wall clock stepping backwards never makes consecutive windows regress.
#[derive(Debug, Clone)]
pub struct LookbackWindow {
    lookback: Duration,
    last_end_ms: Option<i64>,
}

impl LookbackWindow {
    #[must_use]
    pub fn new(lookback: Duration) -> Self {
        Self {
            lookback,
            last_end_ms: None,
        }
    }

    #[must_use]
    pub fn lookback(&self) -> Duration {
        self.lookback
    }

    /// Compute the window for a cycle starting at `now`.
    pub fn next(&mut self, now: DateTime<Utc>) -> TimeWindow {
        let mut window = TimeWindow::ending_at(now, self.lookback);
        if let Some(last_end) = self.last_end_ms {
            if window.end_ms < last_end {
                let shift = last_end - window.end_ms;
                window.start_ms += shift;
                window.end_ms = last_end;
            }
        }
        self.last_end_ms = Some(window.end_ms);
        window
    }
}
