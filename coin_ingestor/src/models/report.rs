use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{sample::Sample, summary::StatsSummary};

/// A window of history for one coin, bundled with its statistics.
///
/// This is what export sinks consume. `summary` is `None` when the window held
/// no samples, and serializes as `null` so the file states "insufficient data"
/// explicitly instead of carrying zero-filled numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReport {
    pub coin_id: String,
    pub period_hours: u32,
    /// When the report was assembled. Also stamps default export filenames.
    pub generated_at: DateTime<Utc>,
    pub summary: Option<StatsSummary>,
    pub history: Vec<Sample>,
}
