//! Polling cadence and failure policy.

use std::time::Duration;

use serde::Deserialize;

use crate::application::SupervisorSettings;
use crate::error::{ConfigError, Result};

const fn default_lookback_minutes() -> u64 {
    45
}

const fn default_interval_secs() -> u64 {
    1
}

const fn default_max_consecutive_errors() -> u32 {
    3
}

/// Poll loop configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Trailing window queried each cycle. Should be much wider than the
    /// interval so a failed cycle cannot hide a status change.
    #[serde(default = "default_lookback_minutes")]
    pub lookback_minutes: u64,
    /// Pause between cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Stop once failed cycles exceed this count.
    #[serde(default = "default_max_consecutive_errors")]
    pub max_consecutive_errors: u32,
    /// Clear the failure count after every successful cycle.
    #[serde(default)]
    pub reset_errors_on_success: bool,
}

impl PollConfig {
    #[must_use]
    pub fn lookback(&self) -> Duration {
        Duration::from_secs(self.lookback_minutes.saturating_mul(60))
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.lookback_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll.lookback_minutes",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        let Some(lookback_secs) = self.lookback_minutes.checked_mul(60) else {
            return Err(ConfigError::InvalidValue {
                field: "poll.lookback_minutes",
                reason: format!("{} minutes is out of range", self.lookback_minutes),
            }
            .into());
        };
        if lookback_secs <= self.interval_secs {
            return Err(ConfigError::InvalidValue {
                field: "poll.lookback_minutes",
                reason: format!(
                    "window of {} minutes must be wider than the {}s poll interval",
                    self.lookback_minutes, self.interval_secs
                ),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            lookback_minutes: default_lookback_minutes(),
            interval_secs: default_interval_secs(),
            max_consecutive_errors: default_max_consecutive_errors(),
            reset_errors_on_success: false,
        }
    }
}

impl From<&PollConfig> for SupervisorSettings {
    fn from(config: &PollConfig) -> Self {
        Self {
            interval: config.interval(),
            max_errors: config.max_consecutive_errors,
            reset_errors_on_success: config.reset_errors_on_success,
        }
    }
}
