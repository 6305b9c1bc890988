//! # Pegwatch
//!
//! Stablecoin peg monitor for DUSD.
//!
//! Pegwatch polls CoinGecko for the current DUSD price, checks it against
//! the `[0.995, 1.005]` tolerance band, and pushes depeg alerts to a
//! Telegram channel and a DingTalk webhook.
//!
//! ## Architecture
//!
//! - **Feed**: one-shot price quote from the CoinGecko simple-price API
//! - **Alerting**: pure band evaluation plus dual-channel notification
//! - **Monitor**: a single stateless fetch-evaluate-notify cycle
//!
//! ## Quick Start
//!
//! ```bash
//! # Run one cycle
//! pegwatch check
//!
//! # Re-check every five minutes
//! pegwatch watch --interval 5m
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod alerting;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod monitor;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::alerting::{NotificationChannel, NotificationSender};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::feed::PriceFeed;
    pub use crate::models::*;
    pub use crate::monitor::Monitor;
}
