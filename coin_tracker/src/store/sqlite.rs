//! SQLite implementation of [`TimeSeriesStore`](crate::store::TimeSeriesStore).

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use coin_ingestor::models::{sample::Sample, snapshot::Snapshot};
use diesel::{dsl::max, prelude::*};
use tracing::{debug, warn};

use crate::{
    clock::{Clock, SystemClock},
    db,
    models::{NewSnapshotRow, SnapshotRow},
    schema::coin_snapshots,
    store::{StoreError, StoredSnapshot, TimeSeriesStore},
    timestamp,
};

use crate::schema::coin_snapshots::dsl as cs;

/// [`TimeSeriesStore`] backed by a single SQLite connection.
pub struct SqliteStore<C: Clock = SystemClock> {
    conn: SqliteConnection,
    clock: C,
}

impl SqliteStore<SystemClock> {
    /// Opens (creating if needed) and migrates the database at `database_url`,
    /// using the wall clock.
    pub fn open_default(database_url: &str) -> anyhow::Result<Self> {
        Self::open(database_url, SystemClock)
    }
}

impl<C: Clock> SqliteStore<C> {
    /// Wraps an already migrated connection.
    pub fn new(conn: SqliteConnection, clock: C) -> Self {
        Self { conn, clock }
    }

    /// Opens (creating if needed) and migrates the database at `database_url`.
    pub fn open(database_url: &str, clock: C) -> anyhow::Result<Self> {
        let conn = db::open_database(database_url)?;
        Ok(Self::new(conn, clock))
    }

    /// Raw connection, for inspection in tests and tooling.
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

fn decode_ts(value: &str) -> Result<DateTime<Utc>, StoreError> {
    timestamp::decode(value).map_err(|source| StoreError::Timestamp {
        value: value.to_string(),
        source,
    })
}

fn by_market_cap_desc(a: &StoredSnapshot, b: &StoredSnapshot) -> Ordering {
    match (a.snapshot.market_cap, b.snapshot.market_cap) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl<C: Clock> TimeSeriesStore for SqliteStore<C> {
    fn append_batch(&mut self, snapshots: &[Snapshot]) -> Result<usize, StoreError> {
        if snapshots.is_empty() {
            return Ok(0);
        }

        let ts = timestamp::encode(self.clock.now());
        let mut written = 0;
        for snapshot in snapshots {
            let row = NewSnapshotRow::from_snapshot(snapshot, &ts);
            match diesel::insert_into(coin_snapshots::table)
                .values(&row)
                .execute(&mut self.conn)
            {
                Ok(n) => written += n,
                Err(e) => {
                    warn!(coin_id = %snapshot.coin_id, error = %e, "skipping snapshot row");
                }
            }
        }

        debug!(ts = %ts, written, total = snapshots.len(), "appended batch");
        Ok(written)
    }

    fn range_query(&mut self, coin_id: &str, hours: u32) -> Result<Vec<Sample>, StoreError> {
        let now = self.clock.now();
        // windows reaching past the representable range cover everything
        let since = now
            .checked_sub_signed(Duration::hours(i64::from(hours)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let since = timestamp::encode(since);
        let until = timestamp::encode(now);

        let rows: Vec<(f64, String)> = cs::coin_snapshots
            .filter(cs::coin_id.eq(coin_id))
            .filter(cs::ts_utc.ge(&since))
            .filter(cs::ts_utc.le(&until))
            .order((cs::ts_utc.asc(), cs::id.asc()))
            .select((cs::price_usd, cs::ts_utc))
            .load(&mut self.conn)?;

        rows.into_iter()
            .map(|(price, ts)| Ok(Sample::new(price, decode_ts(&ts)?)))
            .collect()
    }

    fn latest_batch(&mut self, limit: usize) -> Result<Vec<StoredSnapshot>, StoreError> {
        let latest: Option<String> = cs::coin_snapshots
            .select(max(cs::ts_utc))
            .first(&mut self.conn)?;
        let Some(latest) = latest else {
            return Ok(Vec::new());
        };
        let recorded_at = decode_ts(&latest)?;

        let rows: Vec<SnapshotRow> = cs::coin_snapshots
            .filter(cs::ts_utc.eq(&latest))
            .order(cs::id.asc())
            .select(SnapshotRow::as_select())
            .load(&mut self.conn)?;

        let mut batch: Vec<StoredSnapshot> = rows
            .into_iter()
            .map(|row| StoredSnapshot {
                snapshot: row.into_snapshot(),
                recorded_at,
            })
            .collect();
        // stable sort: equal caps keep insertion order
        batch.sort_by(by_market_cap_desc);
        batch.truncate(limit);
        Ok(batch)
    }

    fn snapshot_count(&mut self) -> Result<i64, StoreError> {
        Ok(cs::coin_snapshots.count().get_result(&mut self.conn)?)
    }
}
