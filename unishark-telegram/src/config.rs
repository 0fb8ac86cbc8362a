//! Bot configuration: token, listening port, webhook URL/path, Bot API URL, log file.
//! Loaded from TELEGRAM_BOT_TOKEN (or BOT_TOKEN), PORT, WEBHOOK_URL, WEBHOOK_PATH, TELEGRAM_API_URL
//! (or TELOXIDE_API_URL) and LOG_FILE.

use std::env;
use unishark_core::{BotError, Result};
use url::Url;

/// Port the webhook listener binds when PORT is unset.
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub port: u16,
    /// Externally reachable base URL Telegram should call (webhook mode).
    pub webhook_url: Option<String>,
    /// Path of the webhook endpoint; defaults to `/<bot token>`.
    pub webhook_path: Option<String>,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

/// Reads an env var, treating empty or whitespace-only values as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TelegramConfig {
    /// Loads from environment variables. `token` overrides TELEGRAM_BOT_TOKEN / BOT_TOKEN; one of them is required.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| non_empty_var("TELEGRAM_BOT_TOKEN"))
            .or_else(|| non_empty_var("BOT_TOKEN"))
            .ok_or_else(|| BotError::Config("TELEGRAM_BOT_TOKEN not set".to_string()))?;
        let port = match non_empty_var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| BotError::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };
        Ok(Self {
            bot_token,
            port,
            webhook_url: non_empty_var("WEBHOOK_URL"),
            webhook_path: non_empty_var("WEBHOOK_PATH"),
            telegram_api_url: non_empty_var("TELEGRAM_API_URL")
                .or_else(|| non_empty_var("TELOXIDE_API_URL")),
            log_file: non_empty_var("LOG_FILE"),
        })
    }

    /// Builds a config with the given token; everything else at defaults.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            port: DEFAULT_PORT,
            webhook_url: None,
            webhook_path: None,
            telegram_api_url: None,
            log_file: None,
        }
    }

    /// Path the webhook listener serves updates on.
    pub fn webhook_path(&self) -> String {
        match &self.webhook_path {
            Some(path) if path.starts_with('/') => path.clone(),
            Some(path) => format!("/{}", path),
            None => format!("/{}", self.bot_token),
        }
    }

    /// Checks the config before anything is started.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            return Err(BotError::Config("bot token is empty".to_string()));
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if Url::parse(url_str).is_err() {
                return Err(BotError::Config(format!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                )));
            }
        }
        let path = self.webhook_path();
        if path == "/" || path == "/health" {
            return Err(BotError::Config(format!(
                "WEBHOOK_PATH collides with the health endpoint: {}",
                path
            )));
        }
        if path.contains(['{', '}', '?', '#']) || path.contains(char::is_whitespace) {
            return Err(BotError::Config("WEBHOOK_PATH contains invalid characters".to_string()));
        }
        if path.split('/').any(|segment| segment.starts_with([':', '*'])) {
            return Err(BotError::Config(format!(
                "WEBHOOK_PATH segments must not start with ':' or '*': {}",
                path
            )));
        }
        Ok(())
    }
}
