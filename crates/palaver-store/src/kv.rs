//! The durable key-value medium behind the store.
//!
//! Every record is a whole named blob read and written as a unit.  The
//! default implementation keeps the blobs in a single-table SQLite
//! database in the platform data directory; [`MemoryKv`] backs tests
//! and ephemeral sessions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{Connection, OptionalExtension};

use crate::error::{Result, StoreError};

/// Blob-level access to the durable medium.
pub trait KeyValueStore: Send {
    /// Read the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous blob.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete the blob under `key`.  No-op if absent.
    fn remove(&mut self, key: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// SQLite
// ---------------------------------------------------------------------------

/// Key-value medium backed by a single SQLite table.
pub struct SqliteKv {
    conn: Connection,
}

impl SqliteKv {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data
    /// directory, e.g. `~/.local/share/palaver/palaver.db` on Linux.
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "palaver", "palaver").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("palaver.db");

        tracing::info!(path = %db_path.display(), "opening key-value store");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// Useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;

        Ok(Self { conn })
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            [key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Volatile key-value medium for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    /// Create an empty in-memory medium.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(kv: &mut dyn KeyValueStore) {
        assert_eq!(kv.get("users").unwrap(), None);

        kv.set("users", "[]").unwrap();
        assert_eq!(kv.get("users").unwrap().as_deref(), Some("[]"));

        kv.set("users", "[1]").unwrap();
        assert_eq!(kv.get("users").unwrap().as_deref(), Some("[1]"));

        kv.remove("users").unwrap();
        assert_eq!(kv.get("users").unwrap(), None);

        // Removing an absent key is a no-op.
        kv.remove("users").unwrap();
    }

    #[test]
    fn test_memory_round_trip() {
        let mut kv = MemoryKv::new();
        exercise(&mut kv);
    }

    #[test]
    fn test_sqlite_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut kv = SqliteKv::open_at(&path).expect("should open");
        assert!(kv.path().is_some());
        exercise(&mut kv);
    }

    #[test]
    fn test_sqlite_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let mut kv = SqliteKv::open_at(&path).unwrap();
            kv.set("current_user", "1").unwrap();
        }

        let kv = SqliteKv::open_at(&path).unwrap();
        assert_eq!(kv.get("current_user").unwrap().as_deref(), Some("1"));
    }
}
