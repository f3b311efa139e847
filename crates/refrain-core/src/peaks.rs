//! Per-frame peak selection.
//!
//! Reduces a power-spectrum frame to its strongest bins. Selection is
//! pure top-k with no threshold, which makes it invariant to overall gain.

use std::cmp::Ordering;

/// Bins below this index carry DC leakage and sub-audible content and are
/// never selected.
pub const MIN_PEAK_BIN: usize = 5;

/// Indices of the `limit` strongest bins in `frame`, strongest first.
///
/// Equal powers resolve to the lower bin index, so the result is
/// deterministic for a given frame on every platform.
pub fn pick_peaks(frame: &[f64], limit: usize) -> Vec<usize> {
    if frame.len() <= MIN_PEAK_BIN || limit == 0 {
        return Vec::new();
    }

    let mut bins: Vec<usize> = (MIN_PEAK_BIN..frame.len()).collect();
    bins.sort_unstable_by(|&a, &b| {
        frame[b]
            .partial_cmp(&frame[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    bins.truncate(limit);
    bins
}
