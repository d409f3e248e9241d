//! Telegram Bot API client - sends replies and registers the webhook

use crate::bot::Reply;
use crate::config::TelegramConfig;
use anyhow::{Context, Result};
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, KeyboardRemove, ParseMode};
use teloxide::Bot;
use tracing::debug;

/// Bot API client, cheap to clone
#[derive(Debug, Clone)]
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let api_url = reqwest::Url::parse(&config.api_url)
            .with_context(|| format!("Invalid Telegram API URL {}", config.api_url))?;

        Ok(Self {
            bot: Bot::new(&config.token).set_api_url(api_url),
        })
    }

    /// Send a reply to a chat
    pub async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat_id), reply.text.as_str());
        if reply.html {
            request = request.parse_mode(ParseMode::Html);
        }
        if reply.remove_keyboard {
            request = request.reply_markup(KeyboardRemove::new());
        }

        debug!("Sending reply to chat {}", chat_id);
        request
            .await
            .with_context(|| format!("Failed to send message to chat {}", chat_id))?;
        Ok(())
    }

    /// Point Telegram at our update endpoint
    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        let url = reqwest::Url::parse(url).with_context(|| format!("Invalid webhook URL {}", url))?;
        self.bot
            .set_webhook(url)
            .await
            .context("Failed to register webhook")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: &str) -> TelegramConfig {
        TelegramConfig {
            token: "123:abc".to_string(),
            access_key: "key".to_string(),
            api_url: api_url.to_string(),
            bot_username: None,
        }
    }

    #[test]
    fn test_api_url_must_parse() {
        assert!(TelegramClient::new(&config("https://api.telegram.org")).is_ok());
        assert!(TelegramClient::new(&config("not a url")).is_err());
    }
}
