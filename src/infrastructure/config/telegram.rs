//! Telegram notification configuration.

use serde::Deserialize;

use crate::application::DEFAULT_DETAIL_URL;
use crate::error::{ConfigError, Result};

fn default_detail_url() -> String {
    DEFAULT_DETAIL_URL.into()
}

/// Telegram notification configuration.
///
/// The bot token and chat ID come from `TELEGRAM_BOT_TOKEN` and
/// `TELEGRAM_CHAT_ID`.
#[derive(Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Order detail page linked from every notification.
    #[serde(default = "default_detail_url")]
    pub detail_url: String,
    #[serde(skip)]
    pub bot_token: Option<String>,
    /// Numeric chat ID or `@channel` username.
    #[serde(skip)]
    pub chat_id: Option<String>,
}

impl TelegramAppConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        url::Url::parse(&self.detail_url).map_err(|e| ConfigError::InvalidValue {
            field: "telegram.detail_url",
            reason: e.to_string(),
        })?;
        if self.bot_token.is_none() {
            return Err(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN",
            }
            .into());
        }
        if self.chat_id.is_none() {
            return Err(ConfigError::MissingField {
                field: "TELEGRAM_CHAT_ID",
            }
            .into());
        }
        Ok(())
    }
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            detail_url: default_detail_url(),
            bot_token: None,
            chat_id: None,
        }
    }
}

impl std::fmt::Debug for TelegramAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramAppConfig")
            .field("detail_url", &self.detail_url)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<set>"))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
