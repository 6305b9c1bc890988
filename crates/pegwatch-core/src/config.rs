//! Configuration management for pegwatch

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Telegram Bot API host used outside of tests
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Main configuration struct
///
/// The process environment is read once at startup and handed to each
/// component explicitly; nothing reads ambient globals afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Price feed configuration
    pub feed: FeedConfig,

    /// Telegram channel configuration, absent when no bot is deployed
    pub telegram: Option<TelegramConfig>,

    /// DingTalk webhook configuration, absent when no webhook is deployed
    pub dingtalk: Option<DingTalkConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            telegram: None,
            dingtalk: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Reads a `.env` file when one is present, then the process
    /// environment: `BOT_TOKEN`, `CHANNEL_ID`, `DINGTALK_WEBHOOK` and
    /// optionally `COINGECKO_BASE_URL`. A channel whose variables are all
    /// absent is simply not configured; a half-configured Telegram channel
    /// is an error.
    pub fn from_env() -> Result<Self> {
        // Missing .env is fine, the process environment still applies.
        let _ = dotenvy::dotenv();

        let mut feed = FeedConfig::default();
        if let Some(base_url) = env_var("COINGECKO_BASE_URL") {
            feed.base_url = base_url;
        }

        let telegram = match (env_var("BOT_TOKEN"), env_var("CHANNEL_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig {
                api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
                bot_token,
                chat_id,
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(Error::config("CHANNEL_ID must be set when BOT_TOKEN is set"))
            }
            (None, Some(_)) => {
                return Err(Error::config("BOT_TOKEN must be set when CHANNEL_ID is set"))
            }
        };

        let dingtalk = env_var("DINGTALK_WEBHOOK").map(|webhook_url| DingTalkConfig { webhook_url });

        Ok(Self {
            feed,
            telegram,
            dingtalk,
        })
    }
}

/// Price feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base URL of the CoinGecko API
    pub base_url: String,

    /// CoinGecko asset identifier to monitor
    pub asset_id: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com".to_string(),
            asset_id: "standx-dusd".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Telegram channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API base URL
    pub api_base: String,

    /// Bot token issued by @BotFather
    pub bot_token: String,

    /// Target channel identifier (negative for channels)
    pub chat_id: String,
}

/// DingTalk webhook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DingTalkConfig {
    /// Full incoming-webhook URL including the access token
    pub webhook_url: String,
}

/// Read an environment variable, treating empty values as unset
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_feed_targets_coingecko_dusd() {
        let config = FeedConfig::default();
        assert_eq!(config.base_url, "https://api.coingecko.com");
        assert_eq!(config.asset_id, "standx-dusd");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn default_config_has_no_channels() {
        let config = Config::default();
        assert!(config.telegram.is_none());
        assert!(config.dingtalk.is_none());
    }
}
