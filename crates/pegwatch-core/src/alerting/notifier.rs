//! Notification delivery for depeg alerts

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::{DingTalkConfig, TelegramConfig};
use crate::models::{PegStatus, PriceReading};

use super::evaluator::tokyo_timestamp;

/// Result of sending a notification
#[derive(Debug, Clone)]
pub struct NotificationResult {
    /// Which channel was attempted ("telegram" or "dingtalk")
    pub channel_type: String,
    /// Whether delivery succeeded
    pub success: bool,
    /// Error message when delivery failed
    pub error: Option<String>,
    /// When the attempt started
    pub sent_at: DateTime<Utc>,
}

/// An outbound notification target
///
/// A channel left unconfigured in a deployment still occupies its slot so
/// that the attempt is made (and reported as failed) without affecting the
/// other channel.
#[derive(Debug, Clone)]
pub enum NotificationChannel {
    /// Telegram channel via the Bot API
    Telegram(Option<TelegramConfig>),
    /// DingTalk incoming webhook
    DingTalk(Option<DingTalkConfig>),
}

impl NotificationChannel {
    fn channel_type(&self) -> &'static str {
        match self {
            Self::Telegram(_) => "telegram",
            Self::DingTalk(_) => "dingtalk",
        }
    }
}

/// Sends depeg notifications through the configured channels
pub struct NotificationSender {
    client: Client,
}

impl NotificationSender {
    /// Create a new notification sender
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Send a notification on every channel
    ///
    /// Channels are attempted in order; a failure in one never prevents
    /// the next. Nothing is retried.
    pub async fn send_all(
        &self,
        channels: &[NotificationChannel],
        reading: &PriceReading,
        status: &PegStatus,
    ) -> Vec<NotificationResult> {
        let mut results = Vec::new();

        for channel in channels {
            let result = self.send(channel, reading, status).await;
            results.push(result);
        }

        results
    }

    /// Send a single notification
    pub async fn send(
        &self,
        channel: &NotificationChannel,
        reading: &PriceReading,
        status: &PegStatus,
    ) -> NotificationResult {
        let sent_at = Utc::now();

        let result = match channel {
            NotificationChannel::Telegram(Some(config)) => {
                self.send_telegram(config, status).await
            }
            NotificationChannel::DingTalk(Some(config)) => {
                self.send_dingtalk(config, reading, status).await
            }
            NotificationChannel::Telegram(None) => Err(NotificationError::Config(
                "BOT_TOKEN and CHANNEL_ID are not set".to_string(),
            )),
            NotificationChannel::DingTalk(None) => Err(NotificationError::Config(
                "DINGTALK_WEBHOOK is not set".to_string(),
            )),
        };

        match &result {
            Ok(()) => info!(channel = channel.channel_type(), "Notification sent"),
            Err(e) => error!(channel = channel.channel_type(), error = %e, "Notification failed"),
        }

        NotificationResult {
            channel_type: channel.channel_type().to_string(),
            success: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
            sent_at,
        }
    }

    /// Send the plain-text alert to a Telegram channel
    async fn send_telegram(
        &self,
        config: &TelegramConfig,
        status: &PegStatus,
    ) -> Result<(), NotificationError> {
        let url = format!("{}/bot{}/sendMessage", config.api_base, config.bot_token);

        let payload = TelegramPayload {
            chat_id: config.chat_id.clone(),
            text: status.message(),
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let http_status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Api(format!(
                "Telegram returned {http_status}: {body}"
            )));
        }

        let body: TelegramResponse = response
            .json()
            .await
            .map_err(|e| NotificationError::Http(e.to_string()))?;

        if !body.ok {
            return Err(NotificationError::Api(
                body.description
                    .unwrap_or_else(|| "unknown Telegram error".to_string()),
            ));
        }

        Ok(())
    }

    /// Send the markdown card to a DingTalk webhook
    async fn send_dingtalk(
        &self,
        config: &DingTalkConfig,
        reading: &PriceReading,
        status: &PegStatus,
    ) -> Result<(), NotificationError> {
        let payload = DingTalkPayload {
            msgtype: "markdown".to_string(),
            markdown: DingTalkMarkdown {
                title: "🪙 DUSD monitor update".to_string(),
                text: format!(
                    "**💰 Price:** ${:.4} USD  \n**📈 24h change:** {:.4}%  \n**⏰ Time:** {}{}",
                    reading.price,
                    reading.change_24h,
                    tokyo_timestamp(Utc::now()),
                    status.warning(),
                ),
            },
            at: DingTalkAt {
                at_mobiles: vec![],
                is_at_all: false,
            },
        };

        let response = self
            .client
            .post(&config.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let http_status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Http(format!(
                "DingTalk returned {http_status}: {body}"
            )));
        }

        let body: DingTalkResponse = response
            .json()
            .await
            .map_err(|e| NotificationError::Http(e.to_string()))?;

        if body.errcode != 0 {
            return Err(NotificationError::Api(body.errmsg));
        }

        Ok(())
    }
}

impl Default for NotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

/// Notification errors
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// Network-level failure or an unusable response
    #[error("HTTP error: {0}")]
    Http(String),

    /// The channel API reported a delivery failure
    #[error("API error: {0}")]
    Api(String),

    /// The channel is not configured in this deployment
    #[error("Configuration error: {0}")]
    Config(String),
}

// Telegram payload types
#[derive(Debug, Serialize)]
struct TelegramPayload {
    chat_id: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    #[serde(default)]
    ok: bool,
    description: Option<String>,
}

// DingTalk payload types
#[derive(Debug, Serialize)]
struct DingTalkPayload {
    msgtype: String,
    markdown: DingTalkMarkdown,
    at: DingTalkAt,
}

#[derive(Debug, Serialize)]
struct DingTalkMarkdown {
    title: String,
    text: String,
}

#[derive(Debug, Serialize)]
struct DingTalkAt {
    #[serde(rename = "atMobiles")]
    at_mobiles: Vec<String>,
    #[serde(rename = "isAtAll")]
    is_at_all: bool,
}

#[derive(Debug, Deserialize)]
struct DingTalkResponse {
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}
