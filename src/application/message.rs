//! Message formatting for order notifications.
//!
//! Output is the HTML subset accepted by Telegram's `HTML` parse mode:
//! `<b>` for labels and `<a href>` for the order link. Every value taken
//! from a trade record is escaped.

use std::time::Duration;

use rust_decimal::{Decimal, RoundingStrategy};
use url::Url;

use crate::domain::{OrderStatus, TradeRecord, TradeSide};
use crate::error::FormatError;

/// Default order detail page on the Binance P2P site.
pub const DEFAULT_DETAIL_URL: &str = "https://p2p.binance.com/en/fiatOrderDetail";

/// Renders trade records and lifecycle events as notification text.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    detail_url: Url,
}

impl MessageFormatter {
    /// Create a formatter that links orders to `detail_url?orderNo=<n>`.
    pub fn new(detail_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            detail_url: Url::parse(detail_url)?,
        })
    }

    /// Link to the order's detail page.
    #[must_use]
    pub fn order_link(&self, order_number: &str) -> Url {
        let mut url = self.detail_url.clone();
        url.query_pairs_mut().append_pair("orderNo", order_number);
        url
    }

    /// Format one trade record.
    ///
    /// Fails if any monetary field is not a decimal; a notification with
    /// garbled amounts is worse than a delayed one.
    pub fn format_order(&self, record: &TradeRecord) -> Result<String, FormatError> {
        // Unit price is shown as received once it is known to be numeric.
        parse_decimal(record, "unitPrice", &record.unit_price)?;
        let total_price = parse_decimal(record, "totalPrice", &record.total_price)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let amount = parse_decimal(record, "amount", &record.amount)?
            .round_dp_with_strategy(8, RoundingStrategy::MidpointAwayFromZero);

        let order_number = record.order_number.as_str();
        let mut text = format!(
            "<b>Status:</b> {}\n\
            <b>Type:</b> {}\n\
            <b>Price:</b> {}{}\n\
            <b>Fiat Amount:</b> {:.2} {}\n\
            <b>Crypto Amount:</b> {:.8} {}\n\
            <b>Order No.:</b> <a href=\"{}\">{}</a>",
            status_label(&record.order_status),
            side_label(&record.trade_type),
            escape_html(&record.fiat_symbol),
            escape_html(record.unit_price.trim()),
            total_price,
            escape_html(&record.fiat),
            amount,
            escape_html(&record.asset),
            escape_html(self.order_link(order_number).as_str()),
            escape_html(order_number),
        );

        if let Some(nick) = record.counter_part_nick_name.as_deref() {
            text.push_str(&format!(
                "\n<b>Counterparty:</b> {}",
                escape_html(&truncate(nick, 32))
            ));
        }

        Ok(text)
    }

    /// Announcement sent once the ledger is seeded.
    #[must_use]
    pub fn started(&self, lookback: Duration, tracked: usize) -> String {
        format!(
            "🟢 <b>Bot Started</b>\n\
            Tracking P2P orders for the last {} minutes.\n\
            Known orders: {}",
            lookback.as_secs() / 60,
            tracked
        )
    }

    /// Final message when the error budget is exhausted.
    #[must_use]
    pub fn stopped_on_errors(&self, error_count: u32) -> String {
        format!("🛑 <b>Bot Stopped</b>\nError Count is {error_count}.")
    }

    /// Final message when the source rejects us outright.
    #[must_use]
    pub fn stopped_on_fatal(&self, reason: &str) -> String {
        format!(
            "🛑 <b>Bot Stopped</b>\nUnrecoverable error: {}",
            escape_html(&truncate(reason, 200))
        )
    }

    /// Final message on operator shutdown.
    #[must_use]
    pub fn stopped_by_operator(&self) -> String {
        "⏹️ <b>Bot Stopped</b>\nShutdown requested by operator.".to_string()
    }
}

fn parse_decimal(
    record: &TradeRecord,
    field: &'static str,
    value: &str,
) -> Result<Decimal, FormatError> {
    value
        .trim()
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(value.trim()))
        .map_err(|_| FormatError::InvalidDecimal {
            order_number: record.order_number.to_string(),
            field,
            value: value.to_string(),
        })
}

/// Display label for an order status.
#[must_use]
pub fn status_label(status: &OrderStatus) -> String {
    let emoji = match status {
        OrderStatus::Pending => "⏳",
        OrderStatus::Trading => "🔄",
        OrderStatus::BuyerPayed => "💸",
        OrderStatus::Distributing => "📤",
        OrderStatus::Completed => "✅",
        OrderStatus::InAppeal => "⚖️",
        OrderStatus::Cancelled => "❌",
        OrderStatus::CancelledBySystem => "🚫",
        OrderStatus::Other(raw) => return escape_html(raw),
    };
    format!("{emoji} {}", status.as_str())
}

/// Display label for a trade side.
#[must_use]
pub fn side_label(side: &TradeSide) -> String {
    match side {
        TradeSide::Buy => "🟢 BUY".to_string(),
        TradeSide::Sell => "🔴 SELL".to_string(),
        TradeSide::Other(raw) => escape_html(raw),
    }
}

/// Truncate a string with ellipsis (Unicode-safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram HTML.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }

    result
}
