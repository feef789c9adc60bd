//! Change detection through a full poll cycle with scripted collaborators.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use orderwatch::application::{MessageFormatter, PollCycle, DEFAULT_DETAIL_URL};
use orderwatch::domain::{LookbackWindow, OrderNumber, OrderStatus, TradeRecord, TradeSide};
use orderwatch::error::{Error, FormatError};
use orderwatch::testkit::domain::{malformed_record, record, sell_record};
use orderwatch::testkit::sink::RecordingSink;
use orderwatch::testkit::source::{Scripted, ScriptedSource};

const LOOKBACK: Duration = Duration::from_secs(45 * 60);

fn at(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

fn cycle(source: &ScriptedSource, sink: &RecordingSink) -> PollCycle {
    PollCycle::new(
        Arc::new(source.clone()),
        Arc::new(sink.clone()),
        MessageFormatter::new(DEFAULT_DETAIL_URL).unwrap(),
        "chat-1",
        LookbackWindow::new(LOOKBACK),
    )
}

fn x1(status: &str) -> TradeRecord {
    TradeRecord {
        order_number: OrderNumber::from("X1"),
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

#[tokio::test]
async fn new_buy_order_then_completion() {
    let source = ScriptedSource::new();
    let sink = RecordingSink::new();
    let mut poll = cycle(&source, &sink);

    source.push_records(TradeSide::Buy, vec![x1("PENDING")]);
    let report = poll.run(at(1_700_000_000_000)).await.unwrap();

    assert_eq!(report.new_orders, 1);
    assert_eq!(sink.len(), 1);
    let text = &sink.texts()[0];
    for needle in ["PENDING", "BUY", "$100", "500.00 USD", "5.00000000 USDT", "X1"] {
        assert!(text.contains(needle), "{needle} missing from {text}");
    }
    assert!(text.contains("orderNo=X1"));
    assert_eq!(
        poll.ledger().get(&OrderNumber::from("X1")),
        Some(&OrderStatus::Pending)
    );

    source.push_records(TradeSide::Buy, vec![x1("COMPLETED")]);
    let report = poll.run(at(1_700_000_001_000)).await.unwrap();

    assert_eq!(report.transitions, 1);
    assert_eq!(sink.len(), 2);
    assert!(sink.texts()[1].contains("COMPLETED"));
    assert_eq!(
        poll.ledger().get(&OrderNumber::from("X1")),
        Some(&OrderStatus::Completed)
    );
    assert_eq!(poll.ledger().len(), 1);
}

#[tokio::test]
async fn unchanged_record_is_reported_once() {
    let source = ScriptedSource::new();
    let sink = RecordingSink::new();
    let mut poll = cycle(&source, &sink);

    source.push_records(TradeSide::Buy, vec![record("A", "TRADING")]);
    source.push_records(TradeSide::Buy, vec![record("A", "TRADING")]);
    poll.run(at(1_700_000_000_000)).await.unwrap();
    let report = poll.run(at(1_700_000_001_000)).await.unwrap();

    assert_eq!(report.fetched, 1);
    assert_eq!(report.notified(), 0);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn duplicate_within_one_response_is_reported_once() {
    let source = ScriptedSource::new();
    let sink = RecordingSink::new();
    let mut poll = cycle(&source, &sink);

    source.push_records(
        TradeSide::Buy,
        vec![record("A", "PENDING"), record("A", "PENDING")],
    );
    let report = poll.run(at(1_700_000_000_000)).await.unwrap();

    assert_eq!(report.fetched, 2);
    assert_eq!(report.new_orders, 1);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn new_order_grows_ledger_by_one() {
    let source = ScriptedSource::new().with_history(TradeSide::Buy, vec![record("OLD", "COMPLETED")]);
    let sink = RecordingSink::new();
    let mut poll = cycle(&source, &sink);
    poll.seed().await.unwrap();
    let before = poll.ledger().len();

    source.push_records(TradeSide::Sell, vec![sell_record("NEW", "PENDING")]);
    let report = poll.run(at(1_700_000_000_000)).await.unwrap();

    assert_eq!(report.new_orders, 1);
    assert_eq!(poll.ledger().len(), before + 1);
    assert!(sink.texts()[0].contains("SELL"));
}

#[tokio::test]
async fn seeded_orders_are_not_announced() {
    let source = ScriptedSource::new()
        .with_history(TradeSide::Buy, vec![record("A", "COMPLETED")])
        .with_history(TradeSide::Sell, vec![sell_record("B", "CANCELLED")]);
    let sink = RecordingSink::new();
    let mut poll = cycle(&source, &sink);

    assert_eq!(poll.seed().await.unwrap(), 2);
    assert!(sink.is_empty());

    let seed_calls = source.calls();
    assert_eq!(seed_calls.len(), 2);
    assert!(seed_calls.iter().all(|call| call.window.is_none()));

    source.push_records(TradeSide::Buy, vec![record("A", "COMPLETED")]);
    source.push_records(TradeSide::Sell, vec![sell_record("B", "CANCELLED")]);
    let report = poll.run(at(1_700_000_000_000)).await.unwrap();
    assert_eq!(report.notified(), 0);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn failed_delivery_still_records_order() {
    let source = ScriptedSource::new();
    let sink = RecordingSink::new();
    let mut poll = cycle(&source, &sink);

    sink.fail_next(1);
    source.push_records(TradeSide::Buy, vec![record("A", "PENDING")]);
    let report = poll.run(at(1_700_000_000_000)).await.unwrap();

    assert_eq!(report.undelivered, 1);
    assert_eq!(report.delivered, 0);
    assert!(poll.ledger().get(&OrderNumber::from("A")).is_some());

    source.push_records(TradeSide::Buy, vec![record("A", "PENDING")]);
    poll.run(at(1_700_000_001_000)).await.unwrap();
    assert_eq!(sink.len(), 1, "undelivered order must not be re-sent");
}

#[tokio::test]
async fn malformed_record_fails_cycle_and_stays_unrecorded() {
    let source = ScriptedSource::new();
    let sink = RecordingSink::new();
    let mut poll = cycle(&source, &sink);

    source.push_records(
        TradeSide::Buy,
        vec![record("GOOD", "PENDING"), malformed_record("BAD", "PENDING")],
    );
    let err = poll.run(at(1_700_000_000_000)).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Format(FormatError::InvalidDecimal { field: "amount", .. })
    ));
    assert!(err.is_recoverable());
    assert_eq!(sink.len(), 1);
    assert!(poll.ledger().get(&OrderNumber::from("GOOD")).is_some());
    assert!(poll.ledger().get(&OrderNumber::from("BAD")).is_none());

    // The SELL side is not reached once the cycle fails.
    assert_eq!(source.windowed_calls().len(), 1);

    source.push_records(TradeSide::Buy, vec![record("BAD", "PENDING")]);
    poll.run(at(1_700_000_001_000)).await.unwrap();
    assert_eq!(sink.len(), 2);
    assert!(poll.ledger().get(&OrderNumber::from("BAD")).is_some());
}

#[tokio::test]
async fn fetch_failure_keeps_earlier_side() {
    let source = ScriptedSource::new();
    let sink = RecordingSink::new();
    let mut poll = cycle(&source, &sink);

    source.push_records(TradeSide::Buy, vec![record("A", "PENDING")]);
    source.push(TradeSide::Sell, Scripted::Fail("timeout".into()));
    assert!(poll.run(at(1_700_000_000_000)).await.is_err());

    assert_eq!(sink.len(), 1);
    assert!(poll.ledger().get(&OrderNumber::from("A")).is_some());

    // The wide window brings the SELL order back on the next cycle.
    source.push_records(TradeSide::Buy, vec![record("A", "PENDING")]);
    source.push_records(TradeSide::Sell, vec![sell_record("B", "TRADING")]);
    let report = poll.run(at(1_700_000_001_000)).await.unwrap();
    assert_eq!(report.new_orders, 1);
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn both_sides_share_a_fresh_window() {
    let source = ScriptedSource::new();
    let sink = RecordingSink::new();
    let mut poll = cycle(&source, &sink);

    poll.run(at(1_700_000_000_000)).await.unwrap();
    poll.run(at(1_700_000_060_000)).await.unwrap();

    let calls = source.windowed_calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0].side, TradeSide::Buy);
    assert_eq!(calls[1].side, TradeSide::Sell);
    assert_eq!(calls[0].window, calls[1].window);

    let first = calls[0].window.unwrap();
    assert_eq!(first.end_ms, 1_700_000_000_000);
    assert_eq!(first.start_ms, 1_700_000_000_000 - 2_700_000);

    let second = calls[2].window.unwrap();
    assert_eq!(second.end_ms, 1_700_000_060_000);
    assert!(second.start_ms >= first.start_ms);
}

#[tokio::test]
async fn notifications_go_to_configured_destination() {
    let source = ScriptedSource::new();
    let sink = RecordingSink::new();
    let mut poll = cycle(&source, &sink);

    source.push_records(TradeSide::Buy, vec![record("A", "PENDING")]);
    poll.run(at(1_700_000_000_000)).await.unwrap();

    assert_eq!(sink.messages()[0].destination, "chat-1");
}
