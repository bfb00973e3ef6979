//! Append-only time-series store of coin snapshots.
//!
//! Every fetch lands as one *batch*: all rows of a batch share the storage
//! timestamp taken from the store's [`Clock`](crate::clock::Clock) when the
//! batch is appended. Rows are never updated or deleted.
//!
//! The SQLite implementation lives in [`sqlite`].

pub mod sqlite;

use chrono::{DateTime, Utc};
use coin_ingestor::models::{sample::Sample, snapshot::Snapshot};

pub use sqlite::SqliteStore;

#[derive(thiserror::Error, Debug)]
/// Errors raised by the time-series store.
pub enum StoreError {
    #[error("database error: {0}")]
    /// Query or connection failure reported by the database.
    Database(#[from] diesel::result::Error),

    #[error("stored timestamp {value:?} is not valid RFC 3339")]
    /// A row carries a timestamp that cannot be decoded.
    Timestamp {
        /// Raw column value.
        value: String,
        /// Parser error.
        source: chrono::ParseError,
    },
}

/// A snapshot together with the instant it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    /// The snapshot as it was fetched.
    pub snapshot: Snapshot,
    /// Storage timestamp shared by its batch.
    pub recorded_at: DateTime<Utc>,
}

/// Portable surface; the SQLite implementation lives in `sqlite.rs`.
pub trait TimeSeriesStore {
    /// Appends one batch and returns how many rows were written.
    ///
    /// Each row is written independently: a row the database rejects is
    /// logged and skipped, and the remaining rows are still written. An empty
    /// batch writes nothing and returns `Ok(0)`.
    fn append_batch(&mut self, snapshots: &[Snapshot]) -> Result<usize, StoreError>;

    /// Price samples for `coin_id` recorded within the trailing `hours`,
    /// i.e. with `now - hours <= ts <= now`, oldest first.
    ///
    /// `coin_id` is matched exactly (case-sensitive). Samples sharing a
    /// timestamp keep their insertion order.
    fn range_query(&mut self, coin_id: &str, hours: u32) -> Result<Vec<Sample>, StoreError>;

    /// Rows of the most recent batch ordered by market cap (largest first,
    /// unknown caps last), at most `limit` of them.
    fn latest_batch(&mut self, limit: usize) -> Result<Vec<StoredSnapshot>, StoreError>;

    /// Total number of stored rows.
    fn snapshot_count(&mut self) -> Result<i64, StoreError>;
}
