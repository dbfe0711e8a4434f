//! SQLite implementation of the storage port.
//!
//! One `records` table plays the role of the browser's local storage:
//! a string key mapping to a JSON document, written synchronously on
//! every state change.

use crate::error::Result;
use crate::storage::StoragePort;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS records (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// SQLite-backed key/value store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a store at the given path.
    ///
    /// Creates the parent directory, database file, and schema if
    /// they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or
    /// the schema fails to apply.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA_SQL)?;

        tracing::debug!(path = %path.display(), "opened store");
        Ok(Self { conn })
    }

    /// Open an in-memory store (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }
}

impl StoragePort for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM records WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO records (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        tracing::debug!(key, bytes = value.len(), "persisted record");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM records WHERE key = ?1", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_is_none() {
        let store = SqliteStore::open_memory().unwrap();
        assert_eq!(store.get("cases").unwrap(), None);
    }

    #[test]
    fn test_set_get_replace() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.set("cases", "[]").unwrap();
        assert_eq!(store.get("cases").unwrap().as_deref(), Some("[]"));

        store.set("cases", "[{\"caseNumber\":\"C-1\"}]").unwrap();
        assert_eq!(
            store.get("cases").unwrap().as_deref(),
            Some("[{\"caseNumber\":\"C-1\"}]")
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.set("labels", "[\"vip\"]").unwrap();
        store.remove("labels").unwrap();
        assert_eq!(store.get("labels").unwrap(), None);
        // Removing an absent key is a no-op.
        store.remove("labels").unwrap();
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.set("products", "[\"Billing\"]").unwrap();
        assert_eq!(store.get("cases").unwrap(), None);
        assert_eq!(store.get("labels").unwrap(), None);
    }

    #[test]
    fn test_reopen_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huddle.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.set("cases", "[1,2,3]").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("cases").unwrap().as_deref(), Some("[1,2,3]"));
    }
}
