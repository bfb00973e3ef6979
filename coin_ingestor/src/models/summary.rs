//! Aggregate statistics over a trailing window of samples.

use serde::{Deserialize, Serialize};

/// Descriptive statistics for one coin over a trailing window.
///
/// Derived on demand from a non-empty run of [`Sample`](crate::models::sample::Sample)s
/// and never persisted. An empty window has no summary at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Coin the samples belong to.
    pub coin_id: String,
    /// Length of the trailing window in hours.
    pub period_hours: u32,
    /// Number of samples that fell inside the window.
    pub data_points: usize,
    /// Most recent price in the window.
    pub current_price: f64,
    /// Arithmetic mean of all prices in the window.
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Last price minus first price.
    pub price_change: f64,
    /// `price_change` relative to the first price, in percent. Zero when the first price is zero.
    pub price_change_percent: f64,
    /// Spread between the highest and lowest price (`max_price - min_price`).
    pub volatility: f64,
}

impl StatsSummary {
    /// Whether the change metrics carry information.
    ///
    /// With a single sample the deltas are trivially zero; callers should
    /// render them as unavailable rather than as a flat market.
    pub fn has_trend(&self) -> bool {
        self.data_points >= 2
    }
}
