//! P2P trade records as reported by the trade-history source.
//!
//! Statuses and sides are closed enums with an `Other` variant so an
//! unrecognised value from the API passes through verbatim instead of
//! failing deserialization or being silently dropped.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::OrderNumber;

/// Lifecycle status of a P2P order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Trading,
    BuyerPayed,
    Distributing,
    Completed,
    InAppeal,
    Cancelled,
    CancelledBySystem,
    /// A status this crate does not know about, kept as the raw literal.
    Other(String),
}

impl OrderStatus {
    /// The wire literal for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Trading => "TRADING",
            Self::BuyerPayed => "BUYER_PAYED",
            Self::Distributing => "DISTRIBUTING",
            Self::Completed => "COMPLETED",
            Self::InAppeal => "IN_APPEAL",
            Self::Cancelled => "CANCELLED",
            Self::CancelledBySystem => "CANCELLED_BY_SYSTEM",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => Self::Pending,
            "TRADING" => Self::Trading,
            "BUYER_PAYED" => Self::BuyerPayed,
            "DISTRIBUTING" => Self::Distributing,
            "COMPLETED" => Self::Completed,
            "IN_APPEAL" => Self::InAppeal,
            "CANCELLED" => Self::Cancelled,
            "CANCELLED_BY_SYSTEM" => Self::CancelledBySystem,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a P2P order from the account owner's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeSide {
    Buy,
    Sell,
    Other(String),
}

impl TradeSide {
    /// The sides polled every cycle, in polling order.
    pub const POLLED: [TradeSide; 2] = [TradeSide::Buy, TradeSide::Sell];

    /// The wire literal for this side.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for TradeSide {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "BUY" => Self::Buy,
            "SELL" => Self::Sell,
            _ => Self::Other(raw),
        }
    }
}

impl From<TradeSide> for String {
    fn from(side: TradeSide) -> Self {
        match side {
            TradeSide::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One P2P order as returned by the trade-history source.
///
/// Monetary fields stay as the decimal strings the API sends; they are only
/// parsed when rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub order_number: OrderNumber,
    pub order_status: OrderStatus,
    pub trade_type: TradeSide,
    pub unit_price: String,
    pub total_price: String,
    pub amount: String,
    pub fiat: String,
    pub fiat_symbol: String,
    pub asset: String,
    /// Order creation time in epoch milliseconds.
    #[serde(default)]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub counter_part_nick_name: Option<String>,
}
