use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// DeepL API config.
///
/// An empty `api_key` is accepted here; DeepL rejects it on first use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepLConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_deepl_api_url")]
    pub api_url: String,
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_deepl_api_url(),
        }
    }
}

/// Target-language selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Interpret `/code text` directives. `false` = single-language mode.
    #[serde(default = "default_true")]
    pub directives: bool,
    /// Provider code used when a message carries no directive.
    #[serde(default = "default_target")]
    pub default_target: String,
    /// Directive code → provider code.
    #[serde(default = "default_language_table")]
    pub table: BTreeMap<String, String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            directives: true,
            default_target: default_target(),
            table: default_language_table(),
        }
    }
}
