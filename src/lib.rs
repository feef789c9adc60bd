//! Orderwatch - P2P order notification relay.
//!
//! Polls a peer-to-peer trade-history API on a fixed cadence, detects new
//! orders and order-status transitions against an in-memory ledger, and
//! forwards one human-readable notification per change.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Trade records, the order ledger, and lookback windows
//! - **`port`** - Traits for the trade-history source and notification sink
//! - **`adapter`** - Binance C2C client and Telegram sink
//! - **`application`** - The poll cycle (change detection) and the supervisor
//!   (cadence, startup seeding, abort policy)
//! - **`infrastructure`** - Configuration loading and wiring
//!
//! # Features
//!
//! - `telegram` - Deliver notifications through a Telegram bot (default)
//! - `testkit` - Scripted source, recording sink, and record builders
//!
//! # Example
//!
//! ```no_run
//! use orderwatch::infrastructure::bootstrap::build_supervisor;
//! use orderwatch::infrastructure::config::settings::Config;
//!
//! # async fn run() -> orderwatch::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let (_tx, shutdown) = tokio::sync::watch::channel(false);
//! let reason = build_supervisor(&config)?.run(shutdown).await?;
//! println!("stopped: {reason:?}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
