#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use coin_ingestor::models::snapshot::Snapshot;
use coin_tracker::clock::FixedClock;
use coin_tracker::db::{connection, migrate};
use coin_tracker::store::SqliteStore;
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}
#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}
#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = Integer, column_name = "timeout")]
    busy_timeout: i32,
}

pub struct TestDb {
    _dir: TempDir,    // keep alive for the life of the test
    pub path: String, // <tmpdir>/test.db
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run_sqlite(&path).expect("migrations");

    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

/// A migrated store on a temp file whose clock the test controls.
pub fn setup_store(
    start: DateTime<Utc>,
) -> (TestDb, SqliteStore<Arc<FixedClock>>, Arc<FixedClock>) {
    let (db, conn) = setup_db();
    let clock = Arc::new(FixedClock::new(start));
    let store = SqliteStore::new(conn, clock.clone());
    (db, store, clock)
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

pub fn snapshot(coin_id: &str, price: f64, change: f64) -> Snapshot {
    Snapshot {
        coin_id: coin_id.to_string(),
        name: coin_id.to_string(),
        symbol: coin_id.chars().take(3).collect(),
        price_usd: price,
        market_cap: Some(price * 1_000.0),
        volume_24h: Some(price * 10.0),
        change_pct_24h: change,
    }
}

pub fn assert_sqlite_pragmas(conn: &mut SqliteConnection) {
    use diesel::sql_query;

    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    assert_eq!(jm.journal_mode.to_lowercase(), "wal"); // WAL is persistent per DB file

    let fk: ForeignKeys = sql_query("PRAGMA foreign_keys;").get_result(conn).unwrap();
    assert_eq!(fk.foreign_keys, 1);

    let bt: BusyTimeout = sql_query("PRAGMA busy_timeout;").get_result(conn).unwrap();
    assert_eq!(bt.busy_timeout, 5000);
}
