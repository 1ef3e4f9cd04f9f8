use thiserror::Error;

/// Top-level error type for Glossa.
#[derive(Debug, Error)]
pub enum GlossaError {
    /// Error from a translation provider.
    #[error("translator error: {0}")]
    Translator(String),

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
