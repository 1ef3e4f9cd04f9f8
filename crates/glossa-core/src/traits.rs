use crate::{
    error::GlossaError,
    message::{IncomingMessage, OutgoingMessage, TranslationRequest},
};
use async_trait::async_trait;

/// Translation provider trait.
///
/// Every translation backend implements this trait so the dispatcher can
/// stay ignorant of wire formats and credentials.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider requires an API key to function.
    fn requires_api_key(&self) -> bool;

    /// Translate a single request, returning the translated text.
    async fn translate(&self, request: &TranslationRequest) -> Result<String, GlossaError>;
}

/// Messaging Channel trait.
///
/// Every messaging platform implements this trait to receive and send
/// messages.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, GlossaError>;

    /// Send a response back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), GlossaError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), GlossaError>;
}
