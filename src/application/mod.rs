//! Application layer: change detection and the polling supervisor.
//!
//! - [`poll`] - One fetch/diff/notify iteration over both trade sides
//! - [`supervisor`] - Cadence, startup seeding, and the abort policy
//! - [`message`] - Notification text rendering

pub mod message;
pub mod poll;
pub mod supervisor;

pub use message::{MessageFormatter, DEFAULT_DETAIL_URL};
pub use poll::{CycleReport, PollCycle};
pub use supervisor::{CycleOutcome, StopReason, Supervisor, SupervisorSettings, SupervisorState};
