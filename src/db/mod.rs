pub mod migrations;
pub mod queries;

use std::time::Duration;

use anyhow::Context;
use rusqlite::Connection;

pub fn init_db(path: &str, busy_timeout_ms: u64) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    // Writers contending for the slot lock wait instead of failing with SQLITE_BUSY.
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))
        .context("failed to set busy timeout")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}
