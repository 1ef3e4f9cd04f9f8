mod dispatcher;

use clap::{Parser, Subcommand};
use glossa_channels::telegram::TelegramChannel;
use glossa_core::{
    config::{self, shellexpand, Config},
    language::LanguageResolver,
    message::TranslationRequest,
    traits::Translator,
};
use glossa_providers::deepl::DeepLTranslator;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "glossa",
    version,
    about = "Glossa — Telegram to DeepL translation relay"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml", env = "GLOSSA_CONFIG")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Show configuration state.
    Status,
    /// Translate a single text and print the result.
    Translate {
        /// Directive code (e.g. "es") or provider code (e.g. "PT-BR").
        #[arg(short, long)]
        to: Option<String>,
        /// The text to translate.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load(&cli.config)?;
    cfg.apply_env();

    let _log_guard = init_tracing(&cfg);
    if let Some(notice) = missing_config_notice(&cli.config) {
        info!("{notice}");
    }

    match cli.command {
        Commands::Start => {
            if cfg.telegram.bot_token.is_empty() {
                anyhow::bail!(
                    "Telegram bot_token is empty. \
                     Set it in config.toml or the TELEGRAM_BOT_TOKEN env var."
                );
            }

            let channel = TelegramChannel::new(cfg.telegram.clone());
            let me = channel
                .get_me()
                .await
                .map_err(|e| anyhow::anyhow!("invalid Telegram bot token: {e}"))?;
            info!("Authorized on account {}", me.username);

            let translator = DeepLTranslator::from_config(&cfg.deepl);
            let resolver = LanguageResolver::from_config(&cfg.languages);

            let dispatcher =
                dispatcher::Dispatcher::new(Arc::new(channel), Arc::new(translator), resolver);
            dispatcher
                .run(async {
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await?;
        }
        Commands::Status => {
            print_status(&cli.config, &cfg);
        }
        Commands::Translate { to, text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: glossa translate [--to <code>] <text>");
            }

            let resolver = LanguageResolver::from_config(&cfg.languages);
            let target = match to.as_deref() {
                Some(code) => resolver
                    .resolve(code)
                    .map(str::to_string)
                    .unwrap_or_else(|| code.to_uppercase()),
                None => resolver.default_target().to_string(),
            };

            let translator = DeepLTranslator::from_config(&cfg.deepl);
            let request = TranslationRequest::new(text.join(" "), target);
            let translated = translator.translate(&request).await?;
            println!("{translated}");
        }
    }

    Ok(())
}

/// Message for a config path that does not exist. `config::load` runs
/// before the subscriber, so the notice is logged afterwards.
fn missing_config_notice(path: &str) -> Option<String> {
    (!Path::new(path).exists())
        .then(|| format!("Config file not found at {path}, using defaults"))
}

/// Set up the global subscriber. Returns the appender guard, which must be
/// held for the life of the process when logging to a file.
fn init_tracing(cfg: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.glossa.log_level));

    match cfg.glossa.log_file.as_deref() {
        Some(path) => {
            let path = shellexpand(path);
            let path = Path::new(&path);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "glossa.log".to_string());

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
            None
        }
    }
}

fn print_status(config_path: &str, cfg: &Config) {
    println!("Glossa — Status Check\n");
    println!("Config: {config_path}");
    println!();
    println!(
        "  telegram: {}",
        if cfg.telegram.bot_token.is_empty() {
            "missing bot_token"
        } else {
            "configured"
        }
    );
    println!(
        "  deepl:    {} ({})",
        if cfg.deepl.api_key.is_empty() {
            "missing api_key"
        } else {
            "configured"
        },
        cfg.deepl.api_url
    );
    println!();

    let resolver = LanguageResolver::from_config(&cfg.languages);
    println!("  directives:     {:?}", resolver.mode());
    println!("  default target: {}", resolver.default_target());
    if !resolver.table().is_empty() {
        let codes: Vec<String> = resolver
            .table()
            .iter()
            .map(|(code, target)| format!("{code}→{target}"))
            .collect();
        println!("  languages:      {}", codes.join(", "));
    }
}
