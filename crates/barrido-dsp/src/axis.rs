//! Linear and logarithmic frequency grids and the mapping between them.

/// Frequencies of `num_samples` uniformly spaced bins: `bin[i] = i * fs / n`.
///
/// One value is produced per transform sample, so the grid spans the full
/// transform length; indices past `num_samples / 2` lie above Nyquist and
/// correspond to the mirrored half of a real signal's spectrum.
pub fn linear_bins(sample_rate: f64, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| i as f64 * sample_rate / num_samples as f64)
        .collect()
}

/// `num_bins` geometrically spaced frequencies covering `f_low` to `f_high`.
pub fn log_bins(num_bins: usize, f_low: f64, f_high: f64) -> Vec<f64> {
    if num_bins <= 1 {
        return vec![f_low; num_bins];
    }
    let start = f_low.log10();
    let span = (f_high / f_low).log10();
    (0..num_bins)
        .map(|i| 10f64.powf(start + i as f64 / (num_bins - 1) as f64 * span))
        .collect()
}

/// For each log-grid frequency, the index of the first linear bin at or
/// above it.
///
/// `linear` must be ascending. Frequencies beyond the last linear bin map
/// to `linear.len()`, one past the end; callers clamp if they index with
/// the result.
pub fn map_log_to_linear_bins(linear: &[f64], log: &[f64]) -> Vec<usize> {
    log.iter()
        .map(|&f| linear.partition_point(|&bin| bin < f))
        .collect()
}
