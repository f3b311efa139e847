//! Top-level registrar and recognizer.
//!
//! Wires the spectral transform, peak selection, landmark hashing, and the
//! catalog together for the two public use-cases: adding a song and
//! identifying a query buffer.

use std::path::Path;

use refrain_db::{Catalog, SongMeta};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::fingerprint::{Landmark, LandmarkHasher};
use crate::matching::{Matcher, RecognitionMatch};
use crate::peaks;
use crate::spectrum::{PowerBackend, SpectrumAnalyzer};

/// Fingerprinting engine bound to one catalog file.
///
/// Each top-level call runs to completion before returning; the catalog is
/// the only shared mutable state, and its writers are serialized through
/// `&mut self`.
pub struct Engine {
    catalog: Catalog,
    analyzer: SpectrumAnalyzer,
    hasher: LandmarkHasher,
    config: EngineConfig,
}

impl Engine {
    /// Open (or create) the catalog at `path` with default parameters.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_config(path, EngineConfig::default())
    }

    pub fn with_config<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog: Catalog::open(path)?,
            analyzer: SpectrumAnalyzer::new(&config),
            hasher: LandmarkHasher::new(&config),
            config,
        })
    }

    /// Engine with an alternate magnitude back end for the transform stage.
    pub fn with_backend<P: AsRef<Path>>(
        path: P,
        config: EngineConfig,
        backend: Box<dyn PowerBackend>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog: Catalog::open(path)?,
            analyzer: SpectrumAnalyzer::with_backend(&config, backend),
            hasher: LandmarkHasher::new(&config),
            config,
        })
    }

    /// Derive the landmark set of a PCM buffer.
    ///
    /// The buffer is borrowed read-only; a buffer shorter than one analysis
    /// window simply yields no landmarks.
    pub fn fingerprint(&self, pcm: &[i16], sample_rate: u32) -> Result<Vec<Landmark>> {
        if sample_rate == 0 {
            return Err(Error::InvalidInput("sample rate must be positive".into()));
        }

        let spectrogram = self.analyzer.analyze(pcm);
        let frame_peaks: Vec<Vec<usize>> = spectrogram
            .frames
            .iter()
            .map(|frame| peaks::pick_peaks(frame, self.config.peaks_per_frame))
            .collect();
        Ok(self.hasher.generate(&frame_peaks, sample_rate))
    }

    /// Register a song.
    ///
    /// Fingerprints the buffer, then writes the song row and all postings
    /// under one transaction: a failure at any step leaves the catalog
    /// exactly as it was.
    pub fn register(&mut self, pcm: &[i16], sample_rate: u32, meta: &SongMeta) -> Result<i64> {
        meta.validate()?;
        let landmarks = self.fingerprint(pcm, sample_rate)?;
        log::info!(
            "registering '{}' by '{}': {} landmarks",
            meta.title,
            meta.artist,
            landmarks.len()
        );

        let items: Vec<(u32, i32)> = landmarks.iter().map(|l| (l.hash, l.anchor_ms)).collect();
        Ok(self.catalog.register_song(meta, &items)?)
    }

    /// Identify a query buffer against the catalog.
    ///
    /// Returns the best match with its raw vote count, or `None` when the
    /// catalog shares nothing with the query.
    pub fn recognize(&self, pcm: &[i16], sample_rate: u32) -> Result<Option<RecognitionMatch>> {
        let landmarks = self.fingerprint(pcm, sample_rate)?;
        log::info!("query produced {} landmarks", landmarks.len());
        Matcher::new(&self.catalog).best_match(&landmarks)
    }

    /// Direct catalog access for stats and maintenance.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
