//! Builders for trade records used across tests.
//!
//! Provides concise factory functions so tests focus on assertions
//! rather than construction boilerplate.

use crate::domain::{OrderNumber, OrderStatus, TradeRecord, TradeSide};

/// A BUY record for `order` in `status` with round-number amounts.
pub fn record(order: &str, status: &str) -> TradeRecord {
    TradeRecord {
        order_number: OrderNumber::from(order),
        order_status: OrderStatus::from(status),
        trade_type: TradeSide::Buy,
        unit_price: "100".into(),
        total_price: "500.00".into(),
        amount: "5.00000000".into(),
        fiat: "USD".into(),
        fiat_symbol: "$".into(),
        asset: "USDT".into(),
        create_time: None,
        counter_part_nick_name: None,
    }
}

/// Same as [`record`] on the SELL side.
pub fn sell_record(order: &str, status: &str) -> TradeRecord {
    TradeRecord {
        trade_type: TradeSide::Sell,
        ..record(order, status)
    }
}

/// A record whose crypto amount cannot be parsed.
pub fn malformed_record(order: &str, status: &str) -> TradeRecord {
    TradeRecord {
        amount: "not-a-number".into(),
        ..record(order, status)
    }
}
