//! Engine tuning parameters.
//!
//! Defaults are tuned for 44.1 kHz material; other rates reuse the same
//! constants, which keeps the band table and frame timing consistent
//! between registration and queries.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Analysis and pairing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Analysis window length in samples. Must be a power of two.
    pub window_size: usize,
    /// Hop between consecutive frames in samples.
    pub hop_size: usize,
    /// Strongest spectral bins kept per frame.
    pub peaks_per_frame: usize,
    /// Pairs emitted per anchor frame, counted across all target frames.
    pub fanout: usize,
    /// Closest target frame considered after an anchor.
    pub target_dt_min: usize,
    /// Farthest target frame considered after an anchor.
    pub target_dt_max: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_size: 2048,
            hop_size: 1024,
            peaks_per_frame: 5,
            fanout: 5,
            target_dt_min: 1,
            target_dt_max: 20,
        }
    }
}

impl EngineConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if !self.window_size.is_power_of_two() {
            return Err(Error::InvalidInput(
                "window_size must be a power of two".into(),
            ));
        }
        if self.hop_size == 0 || self.hop_size > self.window_size {
            return Err(Error::InvalidInput(
                "hop_size must be in 1..=window_size".into(),
            ));
        }
        if self.peaks_per_frame == 0 || self.fanout == 0 {
            return Err(Error::InvalidInput(
                "peaks_per_frame and fanout must be > 0".into(),
            ));
        }
        if self.target_dt_min == 0 || self.target_dt_min > self.target_dt_max {
            return Err(Error::InvalidInput(
                "target zone must satisfy 1 <= target_dt_min <= target_dt_max".into(),
            ));
        }
        Ok(())
    }
}
