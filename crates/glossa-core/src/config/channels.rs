use super::defaults::*;
use serde::{Deserialize, Serialize};

/// Telegram bot config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    /// Bot API root, without the `/bot<token>` suffix.
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    /// Long-poll timeout hint passed to `getUpdates`.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
    /// Pause after a failed poll before trying again.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_url: default_telegram_api_url(),
            poll_timeout_secs: default_poll_timeout(),
            retry_delay_secs: default_retry_delay(),
        }
    }
}
