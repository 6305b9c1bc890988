//! One monitoring cycle: fetch, evaluate, notify
//!
//! Cycles are stateless and independent. No memory of earlier readings is
//! kept, so a sustained breach re-alerts on every cycle the scheduler
//! chooses to run.

use chrono::Utc;
use tracing::{info, warn};

use crate::alerting::{evaluate, NotificationChannel, NotificationSender};
use crate::config::Config;
use crate::feed::PriceFeed;

// Printed after each cycle's status block.
const SEPARATOR: &str = "-----------------------------------";

/// Runs fetch-evaluate-notify passes
pub struct Monitor {
    feed: PriceFeed,
    sender: NotificationSender,
    channels: Vec<NotificationChannel>,
}

impl Monitor {
    /// Wire a monitor from configuration
    ///
    /// Both channel slots are always present; an unconfigured channel is
    /// still attempted and reported as failed without affecting the other.
    pub fn new(config: Config) -> Self {
        let channels = vec![
            NotificationChannel::Telegram(config.telegram),
            NotificationChannel::DingTalk(config.dingtalk),
        ];

        Self {
            feed: PriceFeed::new(config.feed),
            sender: NotificationSender::new(),
            channels,
        }
    }

    /// Run one complete cycle
    ///
    /// A failed fetch skips the rest of the cycle: logs only, no alert. A
    /// breach notifies every channel. Nothing escapes as an error.
    pub async fn run_cycle(&self) {
        let reading = match self.feed.fetch().await {
            Ok(reading) => reading,
            Err(e) => {
                warn!(error = %e, "Price fetch failed, skipping cycle");
                return;
            }
        };

        let status = evaluate(&reading, Utc::now());

        info!("{}", status.message());
        info!("{SEPARATOR}");

        if !status.is_breach() {
            return;
        }

        let results = self
            .sender
            .send_all(&self.channels, &reading, &status)
            .await;

        let delivered = results.iter().filter(|r| r.success).count();
        info!(delivered, attempted = results.len(), "Alert dispatch complete");
    }
}
