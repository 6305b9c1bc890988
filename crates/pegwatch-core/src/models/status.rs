//! Peg status data model

use serde::{Deserialize, Serialize};

/// Direction of a peg breach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreachDirection {
    /// Price fell below the lower bound
    Below,
    /// Price rose above the upper bound
    Above,
}

/// An out-of-band condition attached to a status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breach {
    /// Which side of the band was crossed
    pub direction: BreachDirection,

    /// Warning suffix appended to the baseline message
    pub warning: String,
}

/// Evaluation result for one price reading
///
/// Derived fresh from a reading every cycle and never stored; a sustained
/// breach yields a new status (and a new alert) each time a cycle runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PegStatus {
    /// Baseline status lines: price, 24h change, timestamp
    pub baseline: String,

    /// Present iff the price is outside the tolerance band
    pub breach: Option<Breach>,
}

impl PegStatus {
    /// Whether this status carries a depeg warning
    pub fn is_breach(&self) -> bool {
        self.breach.is_some()
    }

    /// Warning suffix, empty when the price is within the band
    pub fn warning(&self) -> &str {
        self.breach.as_ref().map_or("", |b| b.warning.as_str())
    }

    /// Full message: baseline plus any warning suffix
    pub fn message(&self) -> String {
        format!("{}{}", self.baseline, self.warning())
    }
}
