//! SQLite connection helpers.
//!
//! Provides [`connect_sqlite`] that opens a connection and applies the PRAGMAs
//! the tracker relies on: WAL journaling, foreign_keys=ON, and a 5000ms busy_timeout.
//!
//! Example:
//! ```no_run
//! use coin_tracker::db::connection::connect_sqlite;
//!
//! let path = std::env::temp_dir().join("coin_tracker_example.db");
//! let _conn = connect_sqlite(path.to_str().unwrap()).expect("open sqlite");
//! ```

use anyhow::Context;
use diesel::{Connection, RunQueryDsl, SqliteConnection, sql_query};

/// Accepts bare paths as well as `sqlite:` / `sqlite://` prefixed URLs.
pub fn normalize_sqlite_url(database_url: &str) -> &str {
    database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url)
}

/// Open a SQLite connection and apply connection-wide PRAGMAs.
pub fn connect_sqlite(database_url: &str) -> anyhow::Result<SqliteConnection> {
    let path = normalize_sqlite_url(database_url);
    let mut conn = SqliteConnection::establish(path)
        .with_context(|| format!("failed to open sqlite database at {path}"))?;

    sql_query("PRAGMA journal_mode=WAL;").execute(&mut conn)?;
    sql_query("PRAGMA foreign_keys=ON;").execute(&mut conn)?;
    sql_query("PRAGMA busy_timeout=5000;").execute(&mut conn)?;
    Ok(conn)
}
