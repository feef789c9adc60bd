//! Binance C2C API response types.

use serde::Deserialize;

use crate::domain::TradeRecord;

const fn default_true() -> bool {
    true
}

/// Envelope of `GET /sapi/v1/c2c/orderMatch/listUserOrderHistory`.
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<TradeRecord>>,
    /// Total matching orders across all pages.
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default = "default_true")]
    pub success: bool,
}
