use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Metadata supplied when registering a song.
///
/// Title and artist are required and must be non-empty after trimming;
/// album and genre are optional, and a year of 0 means unknown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongMeta {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub year: u32,
    pub genre: Option<String>,
}

impl SongMeta {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            ..Self::default()
        }
    }

    /// Check the catalog's metadata rules.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() || self.artist.trim().is_empty() {
            return Err(StoreError::EmptyMetadata);
        }
        Ok(())
    }
}

/// A registered song row. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub year: u32,
    pub genre: Option<String>,
}

/// One stored occurrence of a landmark hash: the owning song and the
/// anchor time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub song_id: i64,
    pub offset_ms: i32,
}
