//! localStorage-style key/value store backed by SQLite

use super::RecordStore;
use crate::core::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Browser-local storage emulation: string keys to string values in one table
pub struct BrowserLocalStore {
    conn: Connection,
}

impl BrowserLocalStore {
    /// Open (or create) the store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open a throwaway in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM local_storage ORDER BY key ASC")?;

        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(keys)
    }

    /// Remove every key
    pub fn clear(&mut self) -> Result<u64> {
        let deleted = self.conn.execute("DELETE FROM local_storage", [])?;
        Ok(deleted as u64)
    }
}

impl RecordStore for BrowserLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        self.conn.execute(
            r#"INSERT INTO local_storage (key, value, updated_at)
               VALUES (?1, ?2, ?3)
               ON CONFLICT(key) DO UPDATE SET
                   value = ?2,
                   updated_at = ?3"#,
            params![key, value, now],
        )?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }

    fn name(&self) -> &str {
        "browser local store"
    }
}
