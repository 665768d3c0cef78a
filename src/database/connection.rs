//! SQLite connection management for the policy engine.
//!
//! Provides the [`Database`] struct that wraps a `rusqlite::Connection`,
//! runs schema migrations on open, and exposes the single-key
//! [`StorageBackend`] interface the settings store persists through.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use super::migrations;
use crate::types::errors::StorageError;

/// Single-key JSON read/write store. The engine owns the schema and
/// versioning logic layered on top, not the storage mechanism itself.
pub trait StorageBackend {
    fn read_value(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;
    fn write_value(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError>;
}

/// Core database wrapper providing SQLite-backed key-value storage.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens (or creates) a SQLite database at the given path and runs
    /// migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        migrations::run_all(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Opens an in-memory database. Useful for testing — the contents are
    /// discarded when the `Database` is dropped.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        migrations::run_all(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }
}

impl StorageBackend for Database {
    fn read_value(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        match raw {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| StorageError::Encoding(e.to_string())),
            None => Ok(None),
        }
    }

    fn write_value(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let text =
            serde_json::to_string(value).map_err(|e| StorageError::Encoding(e.to_string()))?;
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Database(e.to_string()))?;
        conn.execute(
            "INSERT OR REPLACE INTO storage (key, value) VALUES (?1, ?2)",
            params![key, text],
        )
        .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }
}
