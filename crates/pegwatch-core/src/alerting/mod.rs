//! Alerting for peg deviations
//!
//! Pure tolerance-band evaluation plus notification delivery to Telegram
//! and DingTalk.

mod evaluator;
mod notifier;

pub use evaluator::{evaluate, tokyo_timestamp, LOWER_BOUND, UPPER_BOUND};
pub use notifier::{NotificationChannel, NotificationError, NotificationResult, NotificationSender};
