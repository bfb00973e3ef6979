use serde::{Deserialize, Serialize};

/// Upper bound the markets endpoint accepts for a single page.
pub const MAX_TOP_N: u32 = 250;

/// Universal parameters for requesting a batch of coin snapshots.
///
/// Vendor-agnostic: each [`SnapshotSource`](crate::providers::SnapshotSource)
/// translates it into its own query and enforces its own limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketsRequestParams {
    /// Quote currency for prices (e.g., `"usd"`, `"eur"`).
    pub vs_currency: String,

    /// How many coins to return, largest market capitalization first.
    pub top_n: u32,
}

impl Default for MarketsRequestParams {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            top_n: 20,
        }
    }
}
