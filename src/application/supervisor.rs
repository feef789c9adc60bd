//! Drives poll cycles on a fixed cadence and owns the abort policy.
//!
//! ```text
//! Starting ──seed ok──▶ Running ──errors > limit──▶ Stopped(ErrorThreshold)
//!    │                     │ ──fatal error──────▶ Stopped(Fatal)
//!    └─seed err─▶ Err      └ ──interrupt────────▶ Stopped(Interrupted)
//! ```

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};

use super::poll::{CycleReport, PollCycle};

/// Tunables for the supervisor loop.
#[derive(Debug, Clone)]
pub struct SupervisorSettings {
    /// Pause between the end of one cycle and the start of the next.
    pub interval: Duration,
    /// Stop once the error count exceeds this value.
    pub max_errors: u32,
    /// Clear the error count after a successful cycle.
    pub reset_errors_on_success: bool,
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_errors: 3,
            reset_errors_on_success: false,
        }
    }
}

/// Why the supervisor stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Too many failed cycles.
    ErrorThreshold { errors: u32 },
    /// A cycle failed in a way retrying cannot fix.
    Fatal { reason: String },
    /// The operator asked for shutdown.
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisorState {
    Starting,
    Running,
    Stopped(StopReason),
}

/// Classified result of one cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    Completed(CycleReport),
    Recoverable(Error),
    Fatal(Error),
}

impl From<Result<CycleReport>> for CycleOutcome {
    fn from(result: Result<CycleReport>) -> Self {
        match result {
            Ok(report) => Self::Completed(report),
            Err(e) if e.is_recoverable() => Self::Recoverable(e),
            Err(e) => Self::Fatal(e),
        }
    }
}

pub struct Supervisor {
    cycle: PollCycle,
    settings: SupervisorSettings,
    state: SupervisorState,
    error_count: u32,
}

impl Supervisor {
    #[must_use]
    pub fn new(cycle: PollCycle, settings: SupervisorSettings) -> Self {
        Self {
            cycle,
            settings,
            state: SupervisorState::Starting,
            error_count: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SupervisorState {
        &self.state
    }

    #[must_use]
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    #[must_use]
    pub fn cycle(&self) -> &PollCycle {
        &self.cycle
    }

    /// Seed the ledger and announce startup.
    ///
    /// A failure here is returned to the caller: without a seeded ledger
    /// every historical order would be reported as new.
    pub async fn start(&mut self) -> Result<()> {
        if self.state != SupervisorState::Starting {
            return Ok(());
        }

        let tracked = self.cycle.seed().await?;
        let text = self
            .cycle
            .formatter()
            .started(self.cycle.window().lookback(), tracked);
        self.cycle.notify(&text).await;

        info!(
            lookback_minutes = self.cycle.window().lookback().as_secs() / 60,
            interval_ms = self.settings.interval.as_millis() as u64,
            "Order tracking started"
        );
        self.state = SupervisorState::Running;
        Ok(())
    }

    /// Run one cycle and apply the error policy.
    ///
    /// Returns the new state. Does nothing once stopped.
    pub async fn step(&mut self) -> &SupervisorState {
        if self.state != SupervisorState::Running {
            return &self.state;
        }

        match CycleOutcome::from(self.cycle.run(Utc::now()).await) {
            CycleOutcome::Completed(report) => {
                if report.notified() > 0 {
                    info!(
                        fetched = report.fetched,
                        new_orders = report.new_orders,
                        transitions = report.transitions,
                        undelivered = report.undelivered,
                        "Cycle completed"
                    );
                } else {
                    debug!(fetched = report.fetched, "Cycle completed, no changes");
                }
                if self.settings.reset_errors_on_success && self.error_count > 0 {
                    debug!(errors = self.error_count, "Error count reset");
                    self.error_count = 0;
                }
            }
            CycleOutcome::Recoverable(e) => {
                self.error_count += 1;
                error!(error = %e, errors = self.error_count, "Poll cycle failed");

                if self.error_count > self.settings.max_errors {
                    warn!(errors = self.error_count, "Error limit exceeded, stopping");
                    let text = self.cycle.formatter().stopped_on_errors(self.error_count);
                    self.stop(
                        StopReason::ErrorThreshold {
                            errors: self.error_count,
                        },
                        &text,
                    )
                    .await;
                }
            }
            CycleOutcome::Fatal(e) => {
                error!(error = %e, "Unrecoverable poll failure, stopping");
                let text = self.cycle.formatter().stopped_on_fatal(&e.to_string());
                self.stop(
                    StopReason::Fatal {
                        reason: e.to_string(),
                    },
                    &text,
                )
                .await;
            }
        }

        &self.state
    }

    /// Mark the supervisor interrupted and send the shutdown notice.
    pub async fn interrupt(&mut self) {
        if matches!(self.state, SupervisorState::Stopped(_)) {
            return;
        }
        info!("Shutdown requested");
        let text = self.cycle.formatter().stopped_by_operator();
        self.stop(StopReason::Interrupted, &text).await;
    }

    /// Start, then poll until stopped.
    ///
    /// `shutdown` is checked between cycles and while sleeping, never in the
    /// middle of a cycle.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<StopReason> {
        self.start().await?;

        loop {
            if *shutdown.borrow() {
                self.interrupt().await;
            }

            if let SupervisorState::Stopped(reason) = self.step().await {
                return Ok(reason.clone());
            }

            tokio::select! {
                () = tokio::time::sleep(self.settings.interval) => {}
                changed = shutdown.changed() => {
                    // Sender gone: nobody can interrupt us any more, keep the cadence.
                    if changed.is_err() {
                        tokio::time::sleep(self.settings.interval).await;
                    }
                }
            }
        }
    }

    async fn stop(&mut self, reason: StopReason, text: &str) {
        self.cycle.notify(text).await;
        self.state = SupervisorState::Stopped(reason);
    }
}
