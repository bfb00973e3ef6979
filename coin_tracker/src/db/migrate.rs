//! Embedded schema migrations.

use anyhow::anyhow;
use diesel::{Connection, SqliteConnection, connection::SimpleConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::db::connection::normalize_sqlite_url;

/// Embedded Diesel migrations bundled with this crate.
///
/// These are applied by [`run_migrations`] to bring the database schema up to date.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies all pending migrations on an already open connection.
pub fn run_migrations(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!(e))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "applied database migrations");
    }
    Ok(())
}

/// Runs pending Diesel migrations on a SQLite database at the given URL.
///
/// This sets the SQLite journal mode to WAL and applies all embedded migrations,
/// returning an error on failure.
pub fn run_sqlite(url: &str) -> anyhow::Result<()> {
    let mut conn = SqliteConnection::establish(normalize_sqlite_url(url))?;
    conn.batch_execute("PRAGMA journal_mode=WAL;")?;
    run_migrations(&mut conn)
}

#[cfg(test)]
mod test {
    use diesel::RunQueryDsl;

    use super::*;

    #[test]
    fn migrations_apply_on_temp_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().to_string_lossy().to_string();

        run_sqlite(&path).expect("migration run");
        // Second run is a no-op.
        run_sqlite(&path).expect("migration rerun");

        let mut conn = SqliteConnection::establish(&path).unwrap();
        diesel::sql_query(
            "INSERT INTO coin_snapshots (coin_id, name, symbol, price_usd, change_pct_24h, ts_utc)
             VALUES ('bitcoin', 'Bitcoin', 'btc', 1.0, 0.0, '2024-01-01T00:00:00.000Z')",
        )
        .execute(&mut conn)
        .unwrap();
    }
}
