//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Tunables come from a TOML file; credentials come only from environment
//! variables (`BINANCE_API_KEY`, `BINANCE_SECRET_KEY`, `TELEGRAM_BOT_TOKEN`,
//! `TELEGRAM_CHAT_ID`). `TELEGRAM_TOKEN` is accepted when
//! `TELEGRAM_BOT_TOKEN` is unset.
//!
//! # Example
//!
//! ```no_run
//! use orderwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::binance::BinanceConfig;
use super::logging::LoggingConfig;
use super::poll::PollConfig;
use super::telegram::TelegramAppConfig;
use crate::error::{ConfigError, Result};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ORDERWATCH_CONFIG";

/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Main application configuration.
///
/// Every section is optional in the file; secrets are filled in from the
/// environment by [`Config::load`] and then validated.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Trade-history API connection.
    #[serde(default)]
    pub binance: BinanceConfig,

    /// Notification target and message options.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Poll cadence and failure policy.
    #[serde(default)]
    pub poll: PollConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and the process environment.
    ///
    /// A missing file is not an error: every tunable has a default. A file
    /// that exists but cannot be read or parsed is.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], with an explicit environment lookup.
    pub fn load_with_env<P, F>(path: P, env: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let content = if path.exists() {
            fs::read_to_string(path).map_err(ConfigError::ReadFile)?
        } else {
            String::new()
        };

        let mut config = Self::parse_toml(&content)?;
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML without touching the environment or validating.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            env(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        self.binance.api_key = var("BINANCE_API_KEY");
        self.binance.secret_key = var("BINANCE_SECRET_KEY");
        self.telegram.bot_token = var("TELEGRAM_BOT_TOKEN").or_else(|| var("TELEGRAM_TOKEN"));
        self.telegram.chat_id = var("TELEGRAM_CHAT_ID");
    }

    /// Check every section; the first problem found is returned.
    pub fn validate(&self) -> Result<()> {
        self.logging.validate()?;
        self.poll.validate()?;
        self.binance.validate()?;
        self.telegram.validate()?;
        Ok(())
    }

    /// Initialize the tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
