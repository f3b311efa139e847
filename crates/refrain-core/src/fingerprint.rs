//! Landmark pairing and hash packing.
//!
//! Pairs each anchor frame's peaks with peaks in a bounded look-ahead
//! window and packs every pair into a 32-bit hash, tagged with the anchor
//! time in milliseconds. Pairing with fanout keeps the representation
//! robust to individual missing peaks, and band quantization absorbs
//! small frequency jitter.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Field layout of the packed hash: anchor code (10 bits) | target code
/// (10 bits) | frame distance (12 bits).
const CODE_MAX: u32 = 0x3FF;
const DT_MAX: u32 = 0xFFF;

/// One landmark: a packed pair hash and the anchor's time in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub hash: u32,
    pub anchor_ms: i32,
}

/// Pack two band codes and a frame distance into a 32-bit hash.
///
/// Values overflowing a field saturate to the field maximum rather than
/// wrapping.
pub fn pack_hash(code1: u32, code2: u32, dt: u32) -> u32 {
    (code1.min(CODE_MAX) << 22) | (code2.min(CODE_MAX) << 12) | dt.min(DT_MAX)
}

/// Decode a packed hash back into `(code1, code2, dt)`.
pub fn unpack_hash(hash: u32) -> (u32, u32, u32) {
    ((hash >> 22) & CODE_MAX, (hash >> 12) & CODE_MAX, hash & DT_MAX)
}

/// Coarse logarithmic-ish frequency band for an FFT bin.
fn band(bin: usize, window_size: usize, sample_rate: u32) -> u32 {
    let freq = bin as f64 * sample_rate as f64 / window_size as f64;
    if freq < 200.0 {
        0
    } else if freq < 400.0 {
        1
    } else if freq < 800.0 {
        2
    } else if freq < 1600.0 {
        3
    } else if freq < 3200.0 {
        4
    } else if freq < 6400.0 {
        5
    } else {
        6
    }
}

/// Band code for a bin: band in the high bits, bin position folded into
/// the low seven. Codes past 10 bits saturate when packed.
fn band_code(bin: usize, window_size: usize, sample_rate: u32) -> u32 {
    band(bin, window_size, sample_rate) * 128 + (bin % 128) as u32
}

/// Turns per-frame peak lists into landmarks.
pub struct LandmarkHasher {
    window_size: usize,
    hop_size: usize,
    fanout: usize,
    target_dt_min: usize,
    target_dt_max: usize,
}

impl LandmarkHasher {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            window_size: config.window_size,
            hop_size: config.hop_size,
            fanout: config.fanout,
            target_dt_min: config.target_dt_min,
            target_dt_max: config.target_dt_max,
        }
    }

    /// Emit landmarks for per-frame peak lists, in anchor-frame order.
    ///
    /// The fanout budget is shared across all of an anchor frame's target
    /// frames and peaks: emission stops for the anchor as soon as the
    /// budget is spent. `sample_rate` must be positive.
    pub fn generate(&self, peaks: &[Vec<usize>], sample_rate: u32) -> Vec<Landmark> {
        debug_assert!(sample_rate > 0);

        let mut out = Vec::with_capacity(peaks.len() * self.fanout);
        if peaks.is_empty() {
            return out;
        }

        let last = peaks.len() - 1;
        for (anchor, anchor_peaks) in peaks.iter().enumerate() {
            if anchor_peaks.is_empty() {
                continue;
            }

            let anchor_ms =
                (anchor as u64 * self.hop_size as u64 * 1000 / sample_rate as u64) as i32;

            let mut emitted = 0;
            'anchor: for target in
                anchor + self.target_dt_min..=(anchor + self.target_dt_max).min(last)
            {
                let dt = (target - anchor) as u32;
                for &f1 in anchor_peaks {
                    let code1 = band_code(f1, self.window_size, sample_rate);
                    for &f2 in &peaks[target] {
                        let code2 = band_code(f2, self.window_size, sample_rate);
                        out.push(Landmark {
                            hash: pack_hash(code1, code2, dt),
                            anchor_ms,
                        });
                        emitted += 1;
                        if emitted >= self.fanout {
                            break 'anchor;
                        }
                    }
                }
            }
        }
        out
    }
}
