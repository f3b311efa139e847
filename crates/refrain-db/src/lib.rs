//! Refrain Catalog Layer
//!
//! Single-file SQLite storage for song metadata and the landmark hash index.

pub mod connection;
pub mod models;
pub mod operations;

// Re-export commonly used types
pub use connection::Catalog;
pub use models::{Posting, Song, SongMeta};

use thiserror::Error;

/// Catalog error kinds.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite failure: open, read, write, or migration.
    #[error("catalog storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Song metadata failed validation; nothing was written.
    #[error("song metadata needs a non-empty title and artist")]
    EmptyMetadata,

    /// The referenced song id is not in the catalog.
    #[error("no song with id {0} in the catalog")]
    UnknownSong(i64),
}
