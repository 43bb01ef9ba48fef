//! Log-binned magnitude response of an impulse response.

use crate::axis::{linear_bins, log_bins, map_log_to_linear_bins};
use crate::fft::magnitude_db;

/// A dB magnitude response resampled onto a geometric frequency grid.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSpectrum {
    /// Geometrically spaced frequencies in Hz.
    pub frequencies: Vec<f64>,
    /// Magnitude in dB at each frequency.
    pub magnitudes_db: Vec<f64>,
}

/// Resample the dB magnitude spectrum of `ir` onto `num_bins` geometrically
/// spaced frequencies from `f_low` to `f_high`.
///
/// Each log bin takes the magnitude of the first linear bin at or above its
/// frequency. Log bins past the last magnitude bin, which occur when
/// `f_high` exceeds Nyquist, clamp to the last one. An empty signal or a
/// zero bin count produces an empty spectrum.
pub fn log_magnitude(
    ir: &[f64],
    sample_rate: f64,
    num_bins: usize,
    f_low: f64,
    f_high: f64,
) -> LogSpectrum {
    if ir.is_empty() || num_bins == 0 {
        return LogSpectrum {
            frequencies: Vec::new(),
            magnitudes_db: Vec::new(),
        };
    }

    let mags = magnitude_db(ir);
    let frequencies = log_bins(num_bins, f_low, f_high);
    let linear = linear_bins(sample_rate, 2 * (mags.len() - 1));
    let magnitudes_db = map_log_to_linear_bins(&linear, &frequencies)
        .into_iter()
        .map(|i| mags[i.min(mags.len() - 1)])
        .collect();

    LogSpectrum {
        frequencies,
        magnitudes_db,
    }
}
