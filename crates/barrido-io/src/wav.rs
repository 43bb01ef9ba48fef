//! WAV file reading and writing for measurement signals.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};

use crate::Result;

/// Read a WAV file and return mono samples plus the sample rate.
///
/// Integer formats are normalized to [-1, 1]; multi-channel files are
/// mixed down to mono by averaging channels. Samples are widened to f64
/// for the analysis pipeline.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, u32)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = f64::from(1u32 << (spec.bits_per_sample - 1));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    // Mix down to mono if multi-channel
    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect()
    } else {
        samples
    };

    tracing::debug!(
        path = %path.display(),
        samples = mono.len(),
        sample_rate = spec.sample_rate,
        channels,
        "read WAV"
    );
    Ok((mono, spec.sample_rate))
}

/// Write mono samples as a 32-bit float WAV file.
///
/// The analysis pipeline runs in f64; samples are narrowed to f32 on disk.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f64], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }
    writer.finalize()?;

    tracing::debug!(
        path = %path.display(),
        samples = samples.len(),
        sample_rate,
        "wrote WAV"
    );
    Ok(())
}
