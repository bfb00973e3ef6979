//! Database utilities for connections and schema migrations.
//!
//! This module provides:
//! - SQLite connection helpers: [`connection::connect_sqlite`] applies WAL,
//!   foreign_keys=ON, and a 5000ms busy_timeout.
//! - Embedded Diesel migrations and runners: [`migrate::run_migrations`] on an open
//!   connection and [`migrate::run_sqlite`] on a database URL.
//! - [`open_database`], which does both and is what the store uses.
//!
//! Example:
//! ```no_run
//! use coin_tracker::db;
//!
//! let db_path = std::env::temp_dir().join("coin_tracker_example.db");
//! let _conn = db::open_database(db_path.to_str().unwrap()).expect("open");
//! ```

pub mod connection;
pub mod migrate;

use diesel::SqliteConnection;

/// Opens a tuned SQLite connection and brings its schema up to date.
pub fn open_database(database_url: &str) -> anyhow::Result<SqliteConnection> {
    let mut conn = connection::connect_sqlite(database_url)?;
    migrate::run_migrations(&mut conn)?;
    Ok(conn)
}
