//! Telegram Bot API channel.
//!
//! Uses long polling via `getUpdates` and `sendMessage` for responses.
//! Docs: <https://core.telegram.org/bots/api>

mod polling;
pub(crate) mod send;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use glossa_core::{config::TelegramConfig, error::GlossaError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use types::{TgResponse, TgUser};

/// Telegram channel using the Bot API with long polling.
pub struct TelegramChannel {
    config: TelegramConfig,
    client: reqwest::Client,
    base_url: String,
    /// Tracks the last update_id to avoid reprocessing.
    last_update_id: Arc<Mutex<Option<i64>>>,
    /// The running `getUpdates` loop, aborted on `stop()`.
    poll_task: std::sync::Mutex<Option<JoinHandle<()>>>,
}

/// The account behind a bot token, as reported by `getMe`.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub id: i64,
    pub username: String,
}

impl TelegramChannel {
    /// Create a new Telegram channel from config.
    pub fn new(config: TelegramConfig) -> Self {
        let base_url = format!(
            "{}/bot{}",
            config.api_url.trim_end_matches('/'),
            config.bot_token
        );
        Self {
            config,
            client: reqwest::Client::new(),
            base_url,
            last_update_id: Arc::new(Mutex::new(None)),
            poll_task: std::sync::Mutex::new(None),
        }
    }

    /// Check the bot token against `getMe`.
    pub async fn get_me(&self) -> Result<BotIdentity, GlossaError> {
        let url = format!("{}/getMe", self.base_url);
        let resp: TgResponse<TgUser> = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GlossaError::Channel(format!("telegram getMe failed: {e}")))?
            .json()
            .await
            .map_err(|e| GlossaError::Channel(format!("telegram getMe parse failed: {e}")))?;

        identity_from(resp)
    }
}

fn identity_from(resp: TgResponse<TgUser>) -> Result<BotIdentity, GlossaError> {
    if !resp.ok {
        return Err(GlossaError::Channel(format!(
            "telegram rejected bot token: {}",
            resp.description.unwrap_or_default()
        )));
    }
    let user = resp
        .result
        .ok_or_else(|| GlossaError::Channel("telegram getMe returned no user".into()))?;
    Ok(BotIdentity {
        id: user.id,
        username: user.username.unwrap_or(user.first_name),
    })
}
