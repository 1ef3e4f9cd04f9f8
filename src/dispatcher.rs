//! Dispatcher — the consumer loop connecting a channel to a translator.
//!
//! Messages are handled strictly one at a time, in the order the channel
//! yields them. A failure only ever affects the message that caused it.

use glossa_core::{
    language::{LanguageResolver, Route, UNSUPPORTED_REPLY},
    message::{IncomingMessage, OutgoingMessage, TranslationRequest},
    traits::{Channel, Translator},
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, warn};


/// What happened to a single inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Empty text or a directive without text; nothing sent.
    Ignored,
    /// Unknown directive; the unsupported-language notice was sent.
    Unsupported,
    /// Translation succeeded and a reply was attempted.
    Translated,
    /// The translator failed; nothing sent.
    Failed,
}

/// Routes inbound messages through the translator and back.
pub struct Dispatcher {
    channel: Arc<dyn Channel>,
    translator: Arc<dyn Translator>,
    resolver: LanguageResolver,
}

impl Dispatcher {
    pub fn new(
        channel: Arc<dyn Channel>,
        translator: Arc<dyn Translator>,
        resolver: LanguageResolver,
    ) -> Self {
        Self {
            channel,
            translator,
            resolver,
        }
    }

    /// Run until the channel closes or `shutdown` resolves.
    pub async fn run<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        info!(
            "Glossa dispatcher running | channel: {} | translator: {} | directives: {:?} | default target: {}",
            self.channel.name(),
            self.translator.name(),
            self.resolver.mode(),
            self.resolver.default_target(),
        );

        let mut rx = self
            .channel
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start channel {}: {e}", self.channel.name()))?;

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                incoming = rx.recv() => match incoming {
                    Some(incoming) => {
                        self.handle_message(&incoming).await;
                    }
                    None => {
                        info!("channel {} closed", self.channel.name());
                        break;
                    }
                },
                _ = &mut shutdown => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        if let Err(e) = self.channel.stop().await {
            warn!("failed to stop channel {}: {e}", self.channel.name());
        }
        info!("Shutdown complete.");
        Ok(())
    }

    /// Handle one inbound message end to end.
    pub async fn handle_message(&self, incoming: &IncomingMessage) -> Outcome {
        debug!(
            "message {} from {}:{} ({} chars)",
            incoming.id,
            incoming.channel,
            incoming.sender_id,
            incoming.text.chars().count()
        );

        match self.resolver.route(&incoming.text) {
            Route::Ignore => {
                debug!("message {} ignored", incoming.id);
                Outcome::Ignored
            }
            Route::Unsupported { code } => {
                info!("unsupported language code '{code}' from {}", incoming.sender_id);
                self.reply(incoming, UNSUPPORTED_REPLY).await;
                Outcome::Unsupported
            }
            Route::Translate { text, target_lang } => {
                let request = TranslationRequest::new(text, target_lang);
                match self.translator.translate(&request).await {
                    Ok(translated) => {
                        debug!("message {} translated to {target_lang}", incoming.id);
                        self.reply(incoming, translated).await;
                        Outcome::Translated
                    }
                    Err(e) => {
                        error!("Translation error: {e}");
                        Outcome::Failed
                    }
                }
            }
        }
    }

    /// Send a plain text reply back to wherever `incoming` came from.
    async fn reply(&self, incoming: &IncomingMessage, text: impl Into<String>) {
        let msg = OutgoingMessage::reply_to(incoming, text);
        if let Err(e) = self.channel.send(msg).await {
            error!("failed to send message: {e}");
        }
    }
}
