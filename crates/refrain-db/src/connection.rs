//! Catalog connection management.

use std::path::Path;

use rusqlite::Connection;

use crate::StoreError;

/// SQLite-backed song catalog.
///
/// The catalog owns its connection. Writes take `&mut self`, so one value
/// serializes its writers; WAL journaling lets other connections on the
/// same file read the most recently committed snapshot concurrently.
pub struct Catalog {
    pub(crate) conn: Connection,
}

impl Catalog {
    /// Open or create the catalog file at `path` and apply the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let mut catalog = Self { conn };
        catalog.migrate()?;
        Ok(catalog)
    }

    /// Private in-memory catalog, mainly for tests. Memory databases have
    /// no journal, so the WAL pragma is skipped.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let mut catalog = Self { conn };
        catalog.migrate()?;
        Ok(catalog)
    }

    /// Create tables and indexes if absent. Idempotent.
    pub fn migrate(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS songs(
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 title TEXT NOT NULL,
                 artist TEXT NOT NULL,
                 album TEXT,
                 year INTEGER NOT NULL DEFAULT 0,
                 genre TEXT);
             CREATE TABLE IF NOT EXISTS fingerprints(
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 song_id INTEGER NOT NULL REFERENCES songs(id),
                 hash INTEGER NOT NULL,
                 offset_ms INTEGER NOT NULL);
             CREATE INDEX IF NOT EXISTS idx_fp_hash ON fingerprints(hash);
             CREATE INDEX IF NOT EXISTS idx_fp_song ON fingerprints(song_id);",
        )?;
        Ok(())
    }
}
