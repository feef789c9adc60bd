//! In-memory record of every order this process has seen.
//!
//! The ledger is the deduplication authority: an order is reported when its
//! number is missing here or its status differs from the stored one. Entries
//! are never evicted.

use std::collections::HashMap;

use super::id::OrderNumber;
use super::trade::{OrderStatus, TradeRecord};

/// How a freshly fetched record relates to what the ledger already knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// The order number has never been seen.
    New,
    /// The order was seen before with a different status.
    Transition { previous: OrderStatus },
    /// Same order, same status.
    Unchanged,
}

impl Observation {
    /// Whether this observation warrants a notification.
    #[must_use]
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Order number → last observed status.
#[derive(Debug, Default, Clone)]
pub struct OrderLedger {
    orders: HashMap<OrderNumber, OrderStatus>,
}

impl OrderLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, order_number: &OrderNumber) -> Option<&OrderStatus> {
        self.orders.get(order_number)
    }

    /// Insert or overwrite the status recorded for an order.
    pub fn set(&mut self, order_number: OrderNumber, status: OrderStatus) {
        self.orders.insert(order_number, status);
    }

    /// Classify a record against the ledger without mutating it.
    #[must_use]
    pub fn observe(&self, record: &TradeRecord) -> Observation {
        match self.get(&record.order_number) {
            None => Observation::New,
            Some(previous) if *previous != record.order_status => Observation::Transition {
                previous: previous.clone(),
            },
            Some(_) => Observation::Unchanged,
        }
    }

    /// Bulk-record a snapshot of orders without classifying them.
    ///
    /// Later records for the same order number win.
    pub fn seed<'a>(&mut self, records: impl IntoIterator<Item = &'a TradeRecord>) {
        for record in records {
            self.set(record.order_number.clone(), record.order_status.clone());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
