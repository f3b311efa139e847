//! PCM16 WAV loading and writing.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{Error, Result};

/// A decoded mono PCM16 buffer with its declared sample rate.
#[derive(Debug, Clone)]
pub struct WavAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

/// Load a PCM16 RIFF/WAVE file.
///
/// Stereo input is down-mixed to mono with the integer arithmetic mean
/// `(L + R) / 2`. Anything other than 16-bit integer PCM with one or two
/// channels is rejected before any processing happens.
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<WavAudio> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(Error::InvalidInput(format!(
            "unsupported wav format: {:?} {}-bit (need 16-bit integer PCM)",
            spec.sample_format, spec.bits_per_sample
        )));
    }

    let raw: Vec<i16> = reader
        .samples::<i16>()
        .collect::<std::result::Result<_, _>>()?;

    let samples = match spec.channels {
        1 => raw,
        2 => raw
            .chunks_exact(2)
            .map(|lr| ((lr[0] as i32 + lr[1] as i32) / 2) as i16)
            .collect(),
        n => {
            return Err(Error::InvalidInput(format!(
                "unsupported channel count: {} (need mono or stereo)",
                n
            )))
        }
    };

    Ok(WavAudio {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Write a mono PCM16 buffer as a WAV file.
pub fn save_wav_mono<P: AsRef<Path>>(path: P, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
