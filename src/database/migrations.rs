//! Schema migrations for the policy engine database.
//!
//! Uses `CREATE TABLE IF NOT EXISTS` so running on every open is idempotent.
//! The settings record's own schema versioning lives in the settings store,
//! not here — this table is an opaque key-value surface.

use rusqlite::Connection;

/// Runs all schema migrations, creating tables if they do not exist.
pub fn run_all(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS storage (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}
