//! Delivery sink - the only outbound capability handlers see.

use reqwest::Url;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tracing::warn;

/// Narrow send capability. Handlers depend on this trait instead of the
/// full Telegram client, which keeps them testable with a recording mock.
#[async_trait::async_trait]
pub trait Delivery: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), String>;

    /// Send a photo by URL. The URL is passed straight through to the
    /// platform; generation providers hand out short-lived links, so it is
    /// never fetched or cached on our side.
    async fn send_photo_url(&self, chat_id: i64, url: &str) -> Result<(), String>;
}

/// Production sink over a teloxide `Bot`.
pub struct TelegramDelivery {
    bot: Bot,
}

impl TelegramDelivery {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait::async_trait]
impl Delivery for TelegramDelivery {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), String> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map(|_| ())
            .map_err(|e| {
                let msg = format!("Failed to send: {e}");
                warn!("{}", msg);
                msg
            })
    }

    async fn send_photo_url(&self, chat_id: i64, url: &str) -> Result<(), String> {
        let url = Url::parse(url).map_err(|e| format!("Bad photo URL: {e}"))?;
        self.bot
            .send_photo(ChatId(chat_id), InputFile::url(url))
            .await
            .map(|_| ())
            .map_err(|e| {
                let msg = format!("Failed to send photo: {e}");
                warn!("{}", msg);
                msg
            })
    }
}
