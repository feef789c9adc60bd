//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::binance::{BinanceC2cClient, BinanceSettings};
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramSink};
use crate::application::{MessageFormatter, PollCycle, Supervisor, SupervisorSettings};
use crate::domain::LookbackWindow;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::{NotificationSink, TradeHistorySource};

/// Build the trade-history source from configuration.
pub fn build_source(config: &Config) -> Result<Arc<dyn TradeHistorySource>> {
    let binance = &config.binance;
    let settings = BinanceSettings {
        api_url: binance.api_url.clone(),
        api_key: binance
            .api_key
            .clone()
            .ok_or(ConfigError::MissingField {
                field: "BINANCE_API_KEY",
            })?,
        secret_key: binance
            .secret_key
            .clone()
            .ok_or(ConfigError::MissingField {
                field: "BINANCE_SECRET_KEY",
            })?,
        recv_window_ms: binance.recv_window_ms,
        page_size: binance.page_size,
        max_pages: binance.max_pages,
    };

    info!(api_url = %settings.api_url, "Binance C2C source configured");
    Ok(Arc::new(BinanceC2cClient::new(settings)))
}

/// Build the notification sink from configuration.
#[cfg(feature = "telegram")]
pub fn build_sink(config: &Config) -> Result<Arc<dyn NotificationSink>> {
    let bot_token = config
        .telegram
        .bot_token
        .clone()
        .ok_or(ConfigError::MissingField {
            field: "TELEGRAM_BOT_TOKEN",
        })?;
    let tg_config = TelegramConfig {
        bot_token,
        chat_id: destination(config)?,
    };

    info!(chat_id = %tg_config.chat_id, "Telegram sink enabled");
    Ok(Arc::new(TelegramSink::new(&tg_config)))
}

/// Build the notification sink (non-telegram variant).
#[cfg(not(feature = "telegram"))]
pub fn build_sink(_config: &Config) -> Result<Arc<dyn NotificationSink>> {
    tracing::warn!("Built without the telegram feature; notifications are only logged");
    Ok(Arc::new(crate::port::LogSink))
}

/// The chat notifications are delivered to.
pub fn destination(config: &Config) -> Result<String> {
    Ok(config
        .telegram
        .chat_id
        .clone()
        .ok_or(ConfigError::MissingField {
            field: "TELEGRAM_CHAT_ID",
        })?)
}

/// Wire a supervisor from configuration and explicit collaborators.
pub fn build_supervisor_with(
    config: &Config,
    source: Arc<dyn TradeHistorySource>,
    sink: Arc<dyn NotificationSink>,
) -> Result<Supervisor> {
    let formatter = MessageFormatter::new(&config.telegram.detail_url).map_err(|e| {
        Error::Config(ConfigError::InvalidValue {
            field: "telegram.detail_url",
            reason: e.to_string(),
        })
    })?;

    let cycle = PollCycle::new(
        source,
        sink,
        formatter,
        destination(config)?,
        LookbackWindow::new(config.poll.lookback()),
    );
    Ok(Supervisor::new(cycle, SupervisorSettings::from(&config.poll)))
}

/// Wire the production supervisor: Binance source, Telegram sink.
pub fn build_supervisor(config: &Config) -> Result<Supervisor> {
    let source = build_source(config)?;
    let sink = build_sink(config)?;
    build_supervisor_with(config, source, sink)
}
