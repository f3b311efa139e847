//! Matching algorithm and recognition results.
//!
//! Aggregates votes over (song, Δt) cells from the catalog's posting
//! lists. Additive noise shifts spectral power but mostly preserves peak
//! constellations, so the true song concentrates its votes in a narrow
//! spike at one time offset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use refrain_db::{Catalog, Song, StoreError};

use crate::error::Result;
use crate::fingerprint::Landmark;

#[cfg(test)]
mod tests;

/// Best catalog match for a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionMatch {
    pub song: Song,
    /// Raw votes collected by the winning (song, Δt) cell. A confidence
    /// proxy: callers treat small counts as weak evidence.
    pub votes: u32,
    /// Winning alignment between stored time and query time, in ms.
    pub offset_ms: i64,
}

/// Vote-based matcher over a catalog.
pub struct Matcher<'a> {
    catalog: &'a Catalog,
}

impl<'a> Matcher<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Histogram votes over (song, Δt) for every query landmark and return
    /// the strongest cell, or `None` when the catalog shares no hash with
    /// the query.
    ///
    /// Δt is kept in raw milliseconds with no coarsening; quantizing to the
    /// hop interval would trade a little sensitivity for tolerance to
    /// sub-hop misalignment.
    pub fn best_match(&self, query: &[Landmark]) -> Result<Option<RecognitionMatch>> {
        let mut votes: HashMap<(i64, i64), u32> = HashMap::new();

        for landmark in query {
            for posting in self.catalog.lookup(landmark.hash)? {
                let delta = posting.offset_ms as i64 - landmark.anchor_ms as i64;
                *votes.entry((posting.song_id, delta)).or_insert(0) += 1;
            }
        }

        // Highest count wins; ties resolve to the lowest song id, then the
        // lowest Δt, so results are reproducible across runs.
        let mut best: Option<((i64, i64), u32)> = None;
        for (&cell, &count) in &votes {
            let better = match best {
                None => true,
                Some((best_cell, best_count)) => {
                    count > best_count || (count == best_count && cell < best_cell)
                }
            };
            if better {
                best = Some((cell, count));
            }
        }

        let Some(((song_id, delta), count)) = best else {
            log::debug!("query shares no hashes with the catalog");
            return Ok(None);
        };

        log::debug!(
            "winning cell: song {} at Δt {} ms with {} of {} query landmarks",
            song_id,
            delta,
            count,
            query.len()
        );

        let song = self
            .catalog
            .get_song(song_id)?
            .ok_or(StoreError::UnknownSong(song_id))?;

        Ok(Some(RecognitionMatch {
            song,
            votes: count,
            offset_ms: delta,
        }))
    }
}
