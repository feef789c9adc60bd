//! Binance C2C (P2P) trade-history adapter.
//!
//! Implements [`TradeHistorySource`](crate::port::TradeHistorySource) on top of
//! the signed `listUserOrderHistory` endpoint.

mod client;
mod dto;
mod signer;

pub use client::{BinanceC2cClient, BinanceSettings, HISTORY_PATH};
pub use signer::Signer;
