//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (the trade-history API and the messaging service).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  (PollCycle, Supervisor)│
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌──────────────┐                                    ┌───────────┐
//! │ Trade history│                                    │ Notifier  │
//! │   Adapter    │                                    │  Adapter  │
//! └──────────────┘                                    └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`TradeHistorySource`] - Fetches P2P trade records for one side
//! - [`NotificationSink`] - Delivers formatted messages (Telegram, logging, etc.)

pub mod outbound;

pub use outbound::history::TradeHistorySource;
pub use outbound::notifier::{Delivery, LogSink, NotificationSink};
