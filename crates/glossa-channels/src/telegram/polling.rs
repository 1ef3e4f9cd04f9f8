//! Long-polling update loop and Channel trait implementation.

use super::send::parse_chat_id;
use super::types::{TgMessage, TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use glossa_core::{
    error::GlossaError,
    message::{IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Extra slack on top of the long-poll timeout before the HTTP call gives up.
const HTTP_TIMEOUT_SLACK_SECS: u64 = 5;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, GlossaError> {
        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let poll_timeout = self.config.poll_timeout_secs;
        let retry_delay = Duration::from_secs(self.config.retry_delay_secs);
        let last_update_id = self.last_update_id.clone();

        info!("Telegram channel starting long polling (timeout {poll_timeout}s)...");

        let handle = tokio::spawn(async move {
            loop {
                let offset = (*last_update_id.lock().await).map(|id| id + 1);
                let url = updates_url(&base_url, poll_timeout, offset);

                let resp = match client
                    .get(&url)
                    .timeout(Duration::from_secs(poll_timeout + HTTP_TIMEOUT_SLACK_SECS))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {retry_delay:?}): {e}");
                        tokio::time::sleep(retry_delay).await;
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {retry_delay:?}): {e}");
                        tokio::time::sleep(retry_delay).await;
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {retry_delay:?}): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(retry_delay).await;
                    continue;
                }

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    let Some(msg) = update.message else {
                        continue;
                    };
                    let Some(incoming) = to_incoming(msg) else {
                        debug!("telegram: skipping update {} without text", update.update_id);
                        continue;
                    };

                    if tx.send(incoming).await.is_err() {
                        info!("telegram channel receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        let previous = self
            .poll_task
            .lock()
            .map_err(|_| GlossaError::Channel("telegram poll task lock poisoned".into()))?
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), GlossaError> {
        let chat_id_str = message
            .reply_target
            .as_deref()
            .ok_or_else(|| GlossaError::Channel("no reply_target on outgoing message".into()))?;

        let chat_id = parse_chat_id(chat_id_str)?;
        self.send_text(chat_id, &message.text).await
    }

    async fn stop(&self) -> Result<(), GlossaError> {
        let handle = self
            .poll_task
            .lock()
            .map_err(|_| GlossaError::Channel("telegram poll task lock poisoned".into()))?
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
        info!("Telegram channel stopped");
        Ok(())
    }
}

/// Build the `getUpdates` URL for the next poll.
pub(crate) fn updates_url(base_url: &str, timeout_secs: u64, offset: Option<i64>) -> String {
    let mut url = format!("{base_url}/getUpdates?timeout={timeout_secs}");
    if let Some(off) = offset {
        url.push_str(&format!("&offset={off}"));
    }
    url
}

/// Convert a Telegram message into an [`IncomingMessage`].
///
/// Returns `None` for messages without text (stickers, photos, service
/// messages).
pub(crate) fn to_incoming(msg: TgMessage) -> Option<IncomingMessage> {
    let text = msg.text.filter(|t| !t.is_empty())?;

    let sender_id = msg
        .from
        .map(|u| u.id)
        .unwrap_or(msg.chat.id)
        .to_string();

    let timestamp = DateTime::<Utc>::from_timestamp(msg.date, 0).unwrap_or_else(Utc::now);

    Some(IncomingMessage {
        id: Uuid::new_v4(),
        channel: "telegram".to_string(),
        sender_id,
        text,
        timestamp,
        reply_target: Some(msg.chat.id.to_string()),
    })
}
