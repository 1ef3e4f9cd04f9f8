mod channels;
mod defaults;
mod providers;

#[cfg(test)]
mod tests;

pub use channels::*;
pub use providers::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::GlossaError;
use defaults::*;

/// Environment variable holding the Telegram bot token.
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the DeepL API key.
pub const ENV_DEEPL_KEY: &str = "DEEPL_API_KEY";
/// Environment variable overriding the DeepL endpoint.
pub const ENV_DEEPL_URL: &str = "DEEPL_API_URL";

/// Top-level Glossa configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub glossa: GlossaConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub deepl: DeepLConfig,
    #[serde(default)]
    pub languages: LanguageConfig,
}

/// General process settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Write logs to this file instead of stdout.
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for GlossaConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Config {
    /// Overlay credentials from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from `lookup`. Non-empty values win over the file.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(ENV_BOT_TOKEN) {
            self.telegram.bot_token = token;
        }
        if let Some(key) = get(ENV_DEEPL_KEY) {
            self.deepl.api_key = key;
        }
        if let Some(url) = get(ENV_DEEPL_URL) {
            self.deepl.api_url = url;
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. This runs before
/// logging is configured, so it does not log; callers report a missing
/// file themselves. Environment overrides are not applied here; see
/// [`Config::apply_env`].
pub fn load(path: &str) -> Result<Config, GlossaError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| GlossaError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse(&content)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, GlossaError> {
    toml::from_str(content).map_err(|e| GlossaError::Config(format!("failed to parse config: {e}")))
}
