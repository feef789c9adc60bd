//! Exchange-agnostic domain logic.

pub mod id;
pub mod ledger;
pub mod trade;
pub mod window;

pub use id::OrderNumber;
pub use ledger::{Observation, OrderLedger};
pub use trade::{OrderStatus, TradeRecord, TradeSide};
pub use window::{LookbackWindow, TimeWindow};
