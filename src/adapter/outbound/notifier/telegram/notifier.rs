//! Telegram notification sink.
//!
//! Provides the [`TelegramSink`] for delivering order notifications. Each
//! call is a single `sendMessage` request in HTML parse mode; failures are
//! reported back as an undelivered [`Delivery`], never retried.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use tracing::debug;

use crate::port::{Delivery, NotificationSink};

/// Configuration for the Telegram sink.
///
/// Built by the config layer from `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat: a numeric chat ID or an `@channel` username.
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

/// Telegram sink that sends messages through a bot.
pub struct TelegramSink {
    bot: Bot,
}

impl TelegramSink {
    #[must_use]
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            bot: Bot::new(&config.bot_token),
        }
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn send(&self, destination: &str, text: &str) -> Delivery {
        match self
            .bot
            .send_message(recipient(destination), text)
            .parse_mode(ParseMode::Html)
            .await
        {
            Ok(message) => {
                debug!(chat = ?message.chat.id, "Telegram accepted message");
                Delivery::delivered(message.id.0.to_string())
            }
            Err(e) => Delivery::failed(e.to_string()),
        }
    }
}

/// Resolve a destination string into a Telegram recipient.
fn recipient(destination: &str) -> Recipient {
    match destination.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(destination.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_numeric_chat() {
        assert_eq!(recipient("-1001234"), Recipient::Id(ChatId(-1_001_234)));
    }

    #[test]
    fn test_recipient_channel_username() {
        assert_eq!(
            recipient("@p2p_orders"),
            Recipient::ChannelUsername("@p2p_orders".to_string())
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let config = TelegramConfig {
            bot_token: "123:secret".into(),
            chat_id: "42".into(),
        };
        assert!(!format!("{config:?}").contains("secret"));
    }
}
