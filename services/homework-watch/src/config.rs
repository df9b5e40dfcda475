//! Configuration types for the homework watcher

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the Practicum API OAuth token
pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the Telegram chat identifier
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Homework status API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Polling cadence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_retry_period")]
    pub retry_period_seconds: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            retry_period_seconds: default_retry_period(),
        }
    }
}

/// Telegram Bot API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
        }
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retry_period() -> u64 {
    600
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

impl Config {
    /// Reject values the watcher cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.polling.retry_period_seconds == 0 {
            return Err(crate::WatchError::Config(
                "retry_period_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::WatchError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content).map_err(|e| {
        crate::WatchError::Config(format!("Failed to parse config file {:?}: {}", path, e))
    })?;
    config.validate()?;
    Ok(config)
}

/// Secrets required to talk to the homework API and to Telegram.
///
/// These are only ever read from the environment, never from the config file.
#[derive(Clone, Default)]
pub struct Credentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &self.practicum_token.as_ref().map(|_| "***"))
            .field("telegram_token", &self.telegram_token.as_ref().map(|_| "***"))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            practicum_token: lookup(PRACTICUM_TOKEN),
            telegram_token: lookup(TELEGRAM_TOKEN),
            telegram_chat_id: lookup(TELEGRAM_CHAT_ID),
        }
    }

    /// Names of the required variables that are absent or blank
    pub fn check_tokens(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN, &self.practicum_token),
            (TELEGRAM_TOKEN, &self.telegram_token),
            (TELEGRAM_CHAT_ID, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }

    /// Fail with [`crate::WatchError::MissingCredentials`] unless every secret is set
    pub fn require_all(&self) -> crate::Result<()> {
        let missing = self.check_tokens();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(crate::WatchError::MissingCredentials(missing))
        }
    }

    pub(crate) fn practicum_token(&self) -> &str {
        self.practicum_token.as_deref().unwrap_or_default()
    }

    pub(crate) fn telegram_token(&self) -> &str {
        self.telegram_token.as_deref().unwrap_or_default()
    }

    pub(crate) fn telegram_chat_id(&self) -> &str {
        self.telegram_chat_id.as_deref().unwrap_or_default()
    }
}
