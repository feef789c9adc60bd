//! Binance C2C API configuration.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

fn default_api_url() -> String {
    "https://api.binance.com".into()
}

const fn default_recv_window_ms() -> u64 {
    5_000
}

const fn default_page_size() -> u32 {
    100
}

const fn default_max_pages() -> u32 {
    10
}

/// Binance connection settings.
///
/// Credentials are loaded from `BINANCE_API_KEY` and `BINANCE_SECRET_KEY`
/// at runtime, never from the config file.
#[derive(Clone, Deserialize)]
pub struct BinanceConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
    /// Rows per history page (1-100).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Upper bound on pages fetched per query.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(skip)]
    pub api_key: Option<String>,
    #[serde(skip)]
    pub secret_key: Option<String>,
}

impl BinanceConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "binance.api_url",
            }
            .into());
        }
        if !(1..=100).contains(&self.page_size) {
            return Err(ConfigError::InvalidValue {
                field: "binance.page_size",
                reason: format!("must be between 1 and 100, got {}", self.page_size),
            }
            .into());
        }
        if self.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "binance.max_pages",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.recv_window_ms == 0 || self.recv_window_ms > 60_000 {
            return Err(ConfigError::InvalidValue {
                field: "binance.recv_window_ms",
                reason: format!("must be between 1 and 60000, got {}", self.recv_window_ms),
            }
            .into());
        }
        if self.api_key.is_none() {
            return Err(ConfigError::MissingField {
                field: "BINANCE_API_KEY",
            }
            .into());
        }
        if self.secret_key.is_none() {
            return Err(ConfigError::MissingField {
                field: "BINANCE_SECRET_KEY",
            }
            .into());
        }
        Ok(())
    }
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            recv_window_ms: default_recv_window_ms(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            api_key: None,
            secret_key: None,
        }
    }
}

impl std::fmt::Debug for BinanceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceConfig")
            .field("api_url", &self.api_url)
            .field("recv_window_ms", &self.recv_window_ms)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<set>"))
            .finish()
    }
}
