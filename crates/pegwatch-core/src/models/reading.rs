//! Price reading data model

use serde::{Deserialize, Serialize};

/// A single price observation for the monitored asset
///
/// Produced fresh each cycle and discarded after use. A reading has no
/// identity beyond its values and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceReading {
    /// Spot price in USD
    pub price: f64,

    /// 24-hour change, signed, in percent
    pub change_24h: f64,
}
