//! One poll iteration: fetch, diff against the ledger, notify, record.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{LookbackWindow, Observation, OrderLedger, TradeRecord, TradeSide};
use crate::error::Result;
use crate::port::{Delivery, NotificationSink, TradeHistorySource};

use super::message::MessageFormatter;

/// Counters for a single completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Records returned by the source across both sides.
    pub fetched: usize,
    /// Orders reported for the first time.
    pub new_orders: usize,
    /// Orders reported because their status changed.
    pub transitions: usize,
    /// Notifications the sink accepted.
    pub delivered: usize,
    /// Notifications the sink rejected; their orders are still recorded.
    pub undelivered: usize,
}

impl CycleReport {
    /// Total notifications attempted in this cycle.
    #[must_use]
    pub fn notified(&self) -> usize {
        self.new_orders + self.transitions
    }
}

/// Change detector that owns the order ledger.
pub struct PollCycle {
    source: Arc<dyn TradeHistorySource>,
    sink: Arc<dyn NotificationSink>,
    formatter: MessageFormatter,
    destination: String,
    window: LookbackWindow,
    ledger: OrderLedger,
}

impl PollCycle {
    pub fn new(
        source: Arc<dyn TradeHistorySource>,
        sink: Arc<dyn NotificationSink>,
        formatter: MessageFormatter,
        destination: impl Into<String>,
        window: LookbackWindow,
    ) -> Self {
        Self {
            source,
            sink,
            formatter,
            destination: destination.into(),
            window,
            ledger: OrderLedger::new(),
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    #[must_use]
    pub fn formatter(&self) -> &MessageFormatter {
        &self.formatter
    }

    #[must_use]
    pub fn window(&self) -> &LookbackWindow {
        &self.window
    }

    /// Populate the ledger from the full history of both sides.
    ///
    /// Seeded orders are recorded silently so that orders which existed
    /// before startup are not announced as new.
    pub async fn seed(&mut self) -> Result<usize> {
        for side in &TradeSide::POLLED {
            let records = self.source.query(side, None).await?;
            debug!(side = %side, count = records.len(), "Startup history fetched");
            self.ledger.seed(&records);
        }

        info!(orders = self.ledger.len(), "Order ledger seeded");
        Ok(self.ledger.len())
    }

    /// Run one cycle with the window ending at `now`.
    ///
    /// Stops at the first fetch or formatting error. Records handled before
    /// the error stay recorded; the failing record is left untouched so the
    /// next cycle sees it again.
    pub async fn run(&mut self, now: DateTime<Utc>) -> Result<CycleReport> {
        let window = self.window.next(now);
        debug!(
            start = window.start_ms,
            end = window.end_ms,
            "Polling trade history"
        );

        let mut report = CycleReport::default();
        for side in &TradeSide::POLLED {
            let records = self.source.query(side, Some(window)).await?;
            report.fetched += records.len();

            for record in &records {
                self.process(record, &mut report).await?;
            }
        }

        Ok(report)
    }

    async fn process(&mut self, record: &TradeRecord, report: &mut CycleReport) -> Result<()> {
        let observation = self.ledger.observe(record);
        if !observation.is_change() {
            return Ok(());
        }

        let text = self.formatter.format_order(record)?;

        match &observation {
            Observation::Transition { previous } => {
                info!(
                    order = %record.order_number,
                    from = %previous,
                    to = %record.order_status,
                    "Order status changed"
                );
                report.transitions += 1;
            }
            _ => {
                info!(
                    order = %record.order_number,
                    status = %record.order_status,
                    side = %record.trade_type,
                    "New order"
                );
                report.new_orders += 1;
            }
        }

        let delivery = self.notify(&text).await;
        if delivery.delivered {
            report.delivered += 1;
        } else {
            report.undelivered += 1;
        }

        // Recorded even when delivery failed: a lost message is acceptable,
        // a repeated one is not.
        self.ledger
            .set(record.order_number.clone(), record.order_status.clone());
        Ok(())
    }

    /// Send a message to the configured destination and log the outcome.
    pub async fn notify(&self, text: &str) -> Delivery {
        let delivery = self.sink.send(&self.destination, text).await;
        if delivery.delivered {
            info!(
                destination = %self.destination,
                message_id = delivery.message_id.as_deref().unwrap_or("-"),
                "Message delivered"
            );
        } else {
            warn!(
                destination = %self.destination,
                error = delivery.error.as_deref().unwrap_or("unknown"),
                "Message delivery failed"
            );
            debug!(text = %text, "Undelivered message");
        }
        delivery
    }
}
