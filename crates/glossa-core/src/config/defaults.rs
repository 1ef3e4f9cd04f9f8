use crate::language::{DEFAULT_DIRECTIVES, DEFAULT_TARGET};
use std::collections::BTreeMap;

pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

pub(super) fn default_poll_timeout() -> u64 {
    60
}

pub(super) fn default_retry_delay() -> u64 {
    3
}

pub(super) fn default_deepl_api_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

pub(super) fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

pub(super) fn default_language_table() -> BTreeMap<String, String> {
    DEFAULT_DIRECTIVES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
