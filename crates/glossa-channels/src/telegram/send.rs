//! Message sending.

use super::TelegramChannel;
use crate::utils::split_message;
use glossa_core::error::GlossaError;

/// Bot API hard limit for a single `sendMessage` text.
pub(crate) const MAX_MESSAGE_LEN: usize = 4096;

impl TelegramChannel {
    /// Send a plain text message to a specific chat.
    pub(crate) async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), GlossaError> {
        let url = format!("{}/sendMessage", self.base_url);

        for chunk in split_message(text, MAX_MESSAGE_LEN) {
            let body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
            });

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| GlossaError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                return Err(GlossaError::Channel(format!(
                    "telegram send failed ({status}): {error_text}"
                )));
            }
        }

        Ok(())
    }
}

/// Parse a `reply_target` into a Telegram chat id.
pub(crate) fn parse_chat_id(target: &str) -> Result<i64, GlossaError> {
    target
        .parse()
        .map_err(|e| GlossaError::Channel(format!("invalid telegram chat_id '{target}': {e}")))
}
