//! Trade-history port.
//!
//! The only way the core learns about orders. Implementations must surface
//! transport and decoding failures as errors; swallowing them would make a
//! failed poll indistinguishable from a quiet one.

use async_trait::async_trait;

use crate::domain::{TimeWindow, TradeRecord, TradeSide};
use crate::error::Result;

/// Source of P2P trade records.
#[async_trait]
pub trait TradeHistorySource: Send + Sync {
    /// Fetch the records for one side.
    ///
    /// With `window` set, returns orders created or changed inside it.
    /// With `None`, returns the full available history; only used to seed
    /// the ledger at startup.
    async fn query(&self, side: &TradeSide, window: Option<TimeWindow>)
        -> Result<Vec<TradeRecord>>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}
