//! Spectral transform.
//!
//! Converts mono PCM16 into power-spectrum frames: overlapping windows,
//! Hann weighting, a forward FFT, and squared magnitudes over the lower
//! half of the spectrum.

use std::sync::Arc;

use rayon::prelude::*;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::config::EngineConfig;

/// Power spectrogram: `frames[t][k]` is the squared magnitude of bin `k`
/// in frame `t`. All values are non-negative.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    pub frames: Vec<Vec<f64>>,
    /// Number of frequency bins per frame (`window_size / 2`).
    pub bins: usize,
}

impl Spectrogram {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Capability object for the magnitude stage.
///
/// Implementations receive the FFT output of a batch of frames and return
/// the first `bins` squared magnitudes of each. Alternate back ends (a GPU
/// dispatch, say) must stay within 1 ULP of [`CpuPower`] per bin.
pub trait PowerBackend: Send + Sync {
    fn power_batch(&self, spectra: &[Vec<Complex<f64>>], bins: usize) -> Vec<Vec<f64>>;
}

/// Reference CPU magnitude implementation.
#[derive(Debug, Default)]
pub struct CpuPower;

impl PowerBackend for CpuPower {
    fn power_batch(&self, spectra: &[Vec<Complex<f64>>], bins: usize) -> Vec<Vec<f64>> {
        spectra
            .iter()
            .map(|spectrum| {
                spectrum[..bins]
                    .iter()
                    .map(|c| c.re * c.re + c.im * c.im)
                    .collect()
            })
            .collect()
    }
}

/// Windowed FFT analyzer.
///
/// The FFT plan and window coefficients are built once and reused for
/// every frame.
pub struct SpectrumAnalyzer {
    window: Vec<f64>,
    fft: Arc<dyn Fft<f64>>,
    backend: Box<dyn PowerBackend>,
    window_size: usize,
    hop_size: usize,
}

impl SpectrumAnalyzer {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_backend(config, Box::new(CpuPower))
    }

    /// Analyzer with an alternate magnitude back end.
    pub fn with_backend(config: &EngineConfig, backend: Box<dyn PowerBackend>) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.window_size);

        Self {
            window: hann_window(config.window_size),
            fft,
            backend,
            window_size: config.window_size,
            hop_size: config.hop_size,
        }
    }

    /// Compute the power spectrogram of `pcm`.
    ///
    /// Fewer samples than one window yields an empty spectrogram; this
    /// stage has no failure mode.
    pub fn analyze(&self, pcm: &[i16]) -> Spectrogram {
        let bins = self.window_size / 2;
        if pcm.len() < self.window_size {
            return Spectrogram {
                frames: Vec::new(),
                bins,
            };
        }

        let frame_count = (pcm.len() - self.window_size) / self.hop_size + 1;

        // Frames are independent, so the parallel result is bit-identical
        // to a sequential pass.
        let spectra: Vec<Vec<Complex<f64>>> = (0..frame_count)
            .into_par_iter()
            .map(|idx| {
                let start = idx * self.hop_size;
                let mut buf: Vec<Complex<f64>> = pcm[start..start + self.window_size]
                    .iter()
                    .zip(&self.window)
                    .map(|(&s, &w)| Complex::new(s as f64 / 32768.0 * w, 0.0))
                    .collect();
                self.fft.process(&mut buf);
                buf
            })
            .collect();

        let frames = self.backend.power_batch(&spectra, bins);
        Spectrogram { frames, bins }
    }
}

/// Hann window, `w[i] = 0.5 * (1 - cos(2πi / (N - 1)))`.
pub fn hann_window(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / (size - 1) as f64).cos())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> SpectrumAnalyzer {
        SpectrumAnalyzer::new(&EngineConfig::default())
    }

    /// PCM16 sinusoid landing exactly on FFT bin `k` of the first window.
    fn bin_sine(k: usize, len: usize, amplitude: f64) -> Vec<i16> {
        (0..len)
            .map(|n| {
                let phase = 2.0 * std::f64::consts::PI * k as f64 * n as f64 / 2048.0;
                (amplitude * phase.sin()) as i16
            })
            .collect()
    }

    #[test]
    fn hann_window_is_symmetric() {
        let window = hann_window(2048);
        assert_eq!(window.len(), 2048);
        assert_eq!(window[0], 0.0);
        for i in 0..2048 {
            assert!((window[i] - window[2047 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn hann_window_peaks_at_center_for_odd_length() {
        let window = hann_window(2049);
        assert!((window[1024] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn short_input_yields_empty_spectrogram() {
        let spectrogram = analyzer().analyze(&vec![100i16; 2047]);
        assert!(spectrogram.is_empty());
        assert_eq!(spectrogram.bins, 1024);
    }

    #[test]
    fn frame_count_follows_hop() {
        // 2048 + 3 * 1024 samples: frames start at 0, 1024, 2048, 3072.
        let spectrogram = analyzer().analyze(&vec![50i16; 2048 + 3 * 1024]);
        assert_eq!(spectrogram.frames.len(), 4);
        assert_eq!(spectrogram.frames[0].len(), 1024);
    }

    #[test]
    fn sinusoid_peaks_at_its_own_bin() {
        let analyzer = analyzer();
        for &k in &[10usize, 100, 441, 1000] {
            let spectrogram = analyzer.analyze(&bin_sine(k, 2048, 12_000.0));
            let frame = &spectrogram.frames[0];
            let argmax = (0..frame.len())
                .max_by(|&a, &b| frame[a].partial_cmp(&frame[b]).unwrap())
                .unwrap();
            assert_eq!(argmax, k, "peak bin for k = {}", k);
        }
    }

    #[test]
    fn power_is_non_negative() {
        let spectrogram = analyzer().analyze(&bin_sine(100, 4096, 8_000.0));
        for frame in &spectrogram.frames {
            assert!(frame.iter().all(|&p| p >= 0.0));
        }
    }

    #[test]
    fn custom_backend_receives_full_spectra() {
        struct HalfPower;
        impl PowerBackend for HalfPower {
            fn power_batch(
                &self,
                spectra: &[Vec<Complex<f64>>],
                bins: usize,
            ) -> Vec<Vec<f64>> {
                CpuPower
                    .power_batch(spectra, bins)
                    .into_iter()
                    .map(|frame| frame.into_iter().map(|p| p * 0.5).collect())
                    .collect()
            }
        }

        let config = EngineConfig::default();
        let reference = SpectrumAnalyzer::new(&config).analyze(&bin_sine(100, 2048, 8_000.0));
        let halved = SpectrumAnalyzer::with_backend(&config, Box::new(HalfPower))
            .analyze(&bin_sine(100, 2048, 8_000.0));

        assert_eq!(halved.frames[0][100], reference.frames[0][100] * 0.5);
    }
}
