//! Catalog read and write operations.

use rusqlite::{params, OptionalExtension, Transaction};

use crate::models::{Posting, Song, SongMeta};
use crate::{Catalog, StoreError};

impl Catalog {
    /// Insert a song row, returning its generated id.
    ///
    /// Title and artist are stored trimmed; validation failure leaves the
    /// catalog untouched.
    pub fn insert_song(&mut self, meta: &SongMeta) -> Result<i64, StoreError> {
        meta.validate()?;
        self.conn.execute(
            "INSERT INTO songs(title, artist, album, year, genre)
             VALUES(?1, ?2, ?3, ?4, ?5)",
            params![
                meta.title.trim(),
                meta.artist.trim(),
                meta.album,
                meta.year,
                meta.genre
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Bulk-insert landmark postings `(hash, offset_ms)` for an existing
    /// song. All-or-nothing: any failure rolls the transaction back and
    /// leaves the index unchanged.
    pub fn insert_fingerprints(
        &mut self,
        song_id: i64,
        items: &[(u32, i32)],
    ) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM songs WHERE id = ?1)",
            params![song_id],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StoreError::UnknownSong(song_id));
        }
        insert_postings(&tx, song_id, items)?;
        tx.commit()?;
        Ok(())
    }

    /// Insert a song and all of its postings under one write transaction.
    /// A failure at any point leaves no trace of the song.
    pub fn register_song(
        &mut self,
        meta: &SongMeta,
        items: &[(u32, i32)],
    ) -> Result<i64, StoreError> {
        meta.validate()?;
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO songs(title, artist, album, year, genre)
             VALUES(?1, ?2, ?3, ?4, ?5)",
            params![
                meta.title.trim(),
                meta.artist.trim(),
                meta.album,
                meta.year,
                meta.genre
            ],
        )?;
        let song_id = tx.last_insert_rowid();
        insert_postings(&tx, song_id, items)?;
        tx.commit()?;

        log::debug!("registered song {} with {} postings", song_id, items.len());
        Ok(song_id)
    }

    /// All postings recorded for a hash. Unordered; duplicates are
    /// legitimate (a song can re-emit the same hash at different anchors).
    pub fn lookup(&self, hash: u32) -> Result<Vec<Posting>, StoreError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT song_id, offset_ms FROM fingerprints WHERE hash = ?1")?;
        let rows = stmt.query_map(params![hash as i64], |row| {
            Ok(Posting {
                song_id: row.get(0)?,
                offset_ms: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Fetch a song row by id.
    pub fn get_song(&self, id: i64) -> Result<Option<Song>, StoreError> {
        let song = self
            .conn
            .query_row(
                "SELECT id, title, artist, album, year, genre FROM songs WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Song {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        artist: row.get(2)?,
                        album: row.get(3)?,
                        year: row.get(4)?,
                        genre: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(song)
    }

    /// Number of registered songs.
    pub fn song_count(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))?)
    }

    /// Number of stored postings across all songs.
    pub fn posting_count(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM fingerprints", [], |row| row.get(0))?)
    }
}

// The statement is prepared once and re-bound per row; this loop is the
// hottest write path in the catalog.
fn insert_postings(tx: &Transaction, song_id: i64, items: &[(u32, i32)]) -> Result<(), StoreError> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO fingerprints(song_id, hash, offset_ms) VALUES(?1, ?2, ?3)",
    )?;
    for &(hash, offset_ms) in items {
        stmt.execute(params![song_id, hash as i64, offset_ms])?;
    }
    Ok(())
}
