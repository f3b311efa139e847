//! Refrain Core - Acoustic Fingerprinting Library
//!
//! Implements landmark-hash fingerprinting: PCM is transformed into a
//! power spectrogram, each frame is reduced to its strongest peaks, and
//! peak pairs across a bounded look-ahead window are packed into 32-bit
//! hashes stored in a persistent catalog. Recognition histograms votes
//! over (song, time-offset) cells of the catalog's posting lists.

pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod matching;
pub mod peaks;
pub mod spectrum;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use fingerprint::{pack_hash, unpack_hash, Landmark, LandmarkHasher};
pub use matching::{Matcher, RecognitionMatch};
pub use spectrum::{CpuPower, PowerBackend, SpectrumAnalyzer, Spectrogram};

// The catalog types are part of the public API surface.
pub use refrain_db::{Catalog, Posting, Song, SongMeta, StoreError};

/// Derive the landmark set of a PCM buffer without touching a catalog.
///
/// `sample_rate` must be positive. A buffer shorter than one analysis
/// window yields no landmarks.
pub fn fingerprint_pcm(pcm: &[i16], sample_rate: u32, config: &EngineConfig) -> Vec<Landmark> {
    let spectrogram = SpectrumAnalyzer::new(config).analyze(pcm);
    let frame_peaks: Vec<Vec<usize>> = spectrogram
        .frames
        .iter()
        .map(|frame| peaks::pick_peaks(frame, config.peaks_per_frame))
        .collect();
    LandmarkHasher::new(config).generate(&frame_peaks, sample_rate)
}
