//! Infrastructure configuration modules.

pub mod binance;
pub mod logging;
pub mod poll;
pub mod settings;
pub mod telegram;
