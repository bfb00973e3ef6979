//! Diesel models mapping to the database schema.
//!
//! These types mirror [`crate::schema::coin_snapshots`] for use with Diesel's
//! Queryable/Insertable APIs. Conversion to and from the canonical
//! [`Snapshot`] lives here so the store never hand-maps columns.

use coin_ingestor::models::snapshot::Snapshot;
use diesel::prelude::*;

use crate::schema::coin_snapshots;

/// A row in [`crate::schema::coin_snapshots`]: one coin as seen by one fetch.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = coin_snapshots, check_for_backend(diesel::sqlite::Sqlite))]
pub struct SnapshotRow {
    /// Database primary key; also breaks ties between rows sharing a timestamp.
    pub id: i32,
    /// Provider coin identifier (e.g., "bitcoin").
    pub coin_id: String,
    /// Human-readable name.
    pub name: String,
    /// Ticker symbol as reported by the provider.
    pub symbol: String,
    /// Price at fetch time.
    pub price_usd: f64,
    /// Market capitalization, when reported.
    pub market_cap: Option<f64>,
    /// 24h traded volume, when reported.
    pub volume_24h: Option<f64>,
    /// Signed 24h percent change.
    pub change_pct_24h: f64,
    /// Storage timestamp, RFC 3339 UTC with milliseconds.
    pub ts_utc: String,
}

impl SnapshotRow {
    /// Drops the storage bookkeeping and returns the canonical snapshot.
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            coin_id: self.coin_id,
            name: self.name,
            symbol: self.symbol,
            price_usd: self.price_usd,
            market_cap: self.market_cap,
            volume_24h: self.volume_24h,
            change_pct_24h: self.change_pct_24h,
        }
    }
}

/// Insertable form of [`SnapshotRow`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = coin_snapshots)]
pub struct NewSnapshotRow<'a> {
    /// Provider coin identifier.
    pub coin_id: &'a str,
    /// Human-readable name.
    pub name: &'a str,
    /// Ticker symbol.
    pub symbol: &'a str,
    /// Price at fetch time.
    pub price_usd: f64,
    /// Market capitalization, when reported.
    pub market_cap: Option<f64>,
    /// 24h traded volume, when reported.
    pub volume_24h: Option<f64>,
    /// Signed 24h percent change.
    pub change_pct_24h: f64,
    /// Storage timestamp assigned by the store.
    pub ts_utc: &'a str,
}

impl<'a> NewSnapshotRow<'a> {
    /// Borrows a snapshot for insertion under the given storage timestamp.
    pub fn from_snapshot(snapshot: &'a Snapshot, ts_utc: &'a str) -> Self {
        Self {
            coin_id: &snapshot.coin_id,
            name: &snapshot.name,
            symbol: &snapshot.symbol,
            price_usd: snapshot.price_usd,
            market_cap: snapshot.market_cap,
            volume_24h: snapshot.volume_24h,
            change_pct_24h: snapshot.change_pct_24h,
            ts_utc,
        }
    }
}
