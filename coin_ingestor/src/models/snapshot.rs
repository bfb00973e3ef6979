//! Canonical in-memory representation of one coin's market data at fetch time.
//!
//! This struct is the standard output of every
//! [`SnapshotSource`](crate::providers::SnapshotSource) implementation,
//! regardless of which vendor produced it.

use serde::{Deserialize, Serialize};

/// One coin's market data as returned by a single fetch.
///
/// Snapshots are produced fresh on each fetch and never mutated afterwards;
/// they have no identity beyond the batch they arrived in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Provider coin identifier (e.g., "bitcoin", "ethereum"). Case-sensitive.
    pub coin_id: String,

    /// Human-readable name (e.g., "Bitcoin").
    pub name: String,

    /// Ticker symbol as the provider reports it (e.g., "btc").
    pub symbol: String,

    /// Current price in the requested vs-currency.
    pub price_usd: f64,

    /// Market capitalization. Not every listing reports one.
    pub market_cap: Option<f64>,

    /// Traded volume over the last 24 hours.
    pub volume_24h: Option<f64>,

    /// Signed percent change over the last 24 hours.
    pub change_pct_24h: f64,
}
