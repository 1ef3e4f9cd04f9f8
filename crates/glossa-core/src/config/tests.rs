use super::*;
use std::collections::HashMap;

#[test]
fn test_defaults_when_empty() {
    let cfg = parse("").unwrap();
    assert_eq!(cfg.glossa.log_level, "info");
    assert!(cfg.glossa.log_file.is_none());
    assert!(cfg.telegram.bot_token.is_empty());
    assert_eq!(cfg.telegram.api_url, "https://api.telegram.org");
    assert_eq!(cfg.telegram.poll_timeout_secs, 60);
    assert_eq!(cfg.telegram.retry_delay_secs, 3);
    assert!(cfg.deepl.api_key.is_empty());
    assert_eq!(cfg.deepl.api_url, "https://api-free.deepl.com/v2/translate");
    assert!(cfg.languages.directives);
    assert_eq!(cfg.languages.default_target, "UK");
    assert_eq!(cfg.languages.table.len(), 6);
    assert_eq!(cfg.languages.table.get("sv").map(String::as_str), Some("SV"));
}

#[test]
fn test_partial_sections() {
    let toml_str = r#"
        [telegram]
        bot_token = "123:abc"

        [languages]
        directives = false
        default_target = "EN-GB"
    "#;
    let cfg = parse(toml_str).unwrap();
    assert_eq!(cfg.telegram.bot_token, "123:abc");
    assert_eq!(cfg.telegram.poll_timeout_secs, 60);
    assert!(!cfg.languages.directives);
    assert_eq!(cfg.languages.default_target, "EN-GB");
    // Table keeps its default when the key is missing.
    assert_eq!(cfg.languages.table.len(), 6);
}

#[test]
fn test_custom_language_table_replaces_default() {
    let toml_str = r#"
        [languages.table]
        ja = "JA"
        pt = "PT-BR"
    "#;
    let cfg = parse(toml_str).unwrap();
    assert_eq!(cfg.languages.table.len(), 2);
    assert_eq!(cfg.languages.table.get("pt").map(String::as_str), Some("PT-BR"));
    assert!(cfg.languages.table.get("en").is_none());
}

#[test]
fn test_invalid_toml_is_config_error() {
    let err = parse("[telegram\nbot_token = ").unwrap_err();
    assert!(matches!(err, GlossaError::Config(_)));
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let cfg = load("/definitely/not/here/glossa.toml").unwrap();
    assert!(cfg.telegram.bot_token.is_empty());
    assert_eq!(cfg.languages.default_target, "UK");
}

#[test]
fn test_load_from_file() {
    let tmp =
        std::env::temp_dir().join(format!("__glossa_test_config_{}.toml", std::process::id()));
    std::fs::write(&tmp, "[deepl]\napi_key = \"file-key\"\n").unwrap();

    let cfg = load(tmp.to_str().unwrap()).unwrap();
    assert_eq!(cfg.deepl.api_key, "file-key");

    let _ = std::fs::remove_file(&tmp);
}

#[test]
fn test_env_overrides_file_values() {
    let mut cfg = parse("[telegram]\nbot_token = \"from-file\"\n").unwrap();
    let env: HashMap<&str, &str> = [
        (ENV_BOT_TOKEN, "from-env"),
        (ENV_DEEPL_KEY, "deepl-env"),
        (ENV_DEEPL_URL, "https://api.deepl.com/v2/translate"),
    ]
    .into_iter()
    .collect();

    cfg.apply_env_from(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.telegram.bot_token, "from-env");
    assert_eq!(cfg.deepl.api_key, "deepl-env");
    assert_eq!(cfg.deepl.api_url, "https://api.deepl.com/v2/translate");
}

#[test]
fn test_empty_env_values_are_ignored() {
    let mut cfg = parse("[deepl]\napi_key = \"keep\"\n").unwrap();
    cfg.apply_env_from(|k| (k == ENV_DEEPL_KEY).then(|| "  ".to_string()));
    assert_eq!(cfg.deepl.api_key, "keep");
    assert!(cfg.telegram.bot_token.is_empty());
}

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("/var/log/glossa.log"), "/var/log/glossa.log");
    assert_eq!(shellexpand("relative.log"), "relative.log");
}
