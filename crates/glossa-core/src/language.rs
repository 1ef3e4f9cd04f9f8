//! Language directive parsing and target-language resolution.
//!
//! A message of the form `/<code> <text>` asks for `<text>` to be translated
//! into the language behind `<code>`. Anything else goes to the default
//! target. Parsing is purely syntactic: the command token ends at the first
//! space and nothing is escaped or quoted.

use crate::config::LanguageConfig;
use std::collections::BTreeMap;

/// Reply sent when a directive names a code missing from the table.
pub const UNSUPPORTED_REPLY: &str = "Unsupported language code!";

/// Fallback target when a message carries no directive.
pub const DEFAULT_TARGET: &str = "UK";

/// Built-in directive table: short chat code → provider code.
pub const DEFAULT_DIRECTIVES: &[(&str, &str)] = &[
    ("en", "EN"),
    ("tr", "TR"),
    ("de", "DE"),
    ("es", "ES"),
    ("fr", "FR"),
    ("sv", "SV"),
];

/// Whether `/code` prefixes are interpreted at all.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveMode {
    /// `/code text` selects the target language.
    #[default]
    Commands,
    /// Every message, slash or not, goes to the default target.
    Disabled,
}

/// Lookup table from chat directive codes to provider codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    entries: BTreeMap<String, String>,
}

impl LanguageTable {
    /// Build a table from arbitrary `(code, provider_code)` pairs.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A table with no entries; every directive is unsupported.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Resolve a directive code. Matching is exact (`"EN"` is not `"en"`).
    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTIVES.iter().copied())
    }
}

/// What the dispatcher should do with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// Nothing to do, no reply.
    Ignore,
    /// A directive named an unknown code.
    Unsupported { code: &'a str },
    /// Translate `text` into `target_lang`.
    Translate { text: &'a str, target_lang: &'a str },
}

/// Decides the target language for each inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageResolver {
    mode: DirectiveMode,
    table: LanguageTable,
    default_target: String,
}

impl LanguageResolver {
    pub fn new(
        mode: DirectiveMode,
        table: LanguageTable,
        default_target: impl Into<String>,
    ) -> Self {
        Self {
            mode,
            table,
            default_target: default_target.into(),
        }
    }

    /// Multi-language variant with the built-in table.
    pub fn with_directives() -> Self {
        Self::new(
            DirectiveMode::Commands,
            LanguageTable::default(),
            DEFAULT_TARGET,
        )
    }

    /// Single-language variant: everything goes to `default_target`.
    pub fn single(default_target: impl Into<String>) -> Self {
        Self::new(DirectiveMode::Disabled, LanguageTable::empty(), default_target)
    }

    pub fn from_config(cfg: &LanguageConfig) -> Self {
        let mode = if cfg.directives {
            DirectiveMode::Commands
        } else {
            DirectiveMode::Disabled
        };
        Self::new(
            mode,
            LanguageTable::new(cfg.table.clone()),
            cfg.default_target.clone(),
        )
    }

    pub fn mode(&self) -> DirectiveMode {
        self.mode
    }

    pub fn table(&self) -> &LanguageTable {
        &self.table
    }

    pub fn default_target(&self) -> &str {
        &self.default_target
    }

    /// Resolve a bare directive code against the table.
    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.table.resolve(code)
    }

    /// Route a message text.
    pub fn route<'a>(&'a self, text: &'a str) -> Route<'a> {
        if text.is_empty() {
            return Route::Ignore;
        }

        if self.mode == DirectiveMode::Commands && text.starts_with('/') {
            let Some((command, rest)) = text.split_once(' ') else {
                return Route::Ignore;
            };
            // Only the first slash belongs to the directive syntax.
            let code = command.strip_prefix('/').unwrap_or(command);
            return match self.table.resolve(code) {
                Some(target_lang) => Route::Translate {
                    text: rest,
                    target_lang,
                },
                None => Route::Unsupported { code },
            };
        }

        Route::Translate {
            text,
            target_lang: &self.default_target,
        }
    }
}

impl Default for LanguageResolver {
    fn default() -> Self {
        Self::with_directives()
    }
}
