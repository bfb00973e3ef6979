use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted `(price, timestamp)` pair for one coin.
///
/// Samples for a coin form an append-only sequence ordered by `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn new(price: f64, timestamp: DateTime<Utc>) -> Self {
        Self { price, timestamp }
    }
}
