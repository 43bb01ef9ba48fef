//! Fitting a small parametric filter bank to a measured magnitude curve.
//!
//! Peaks in the measured response seed one bell filter each; a simplex
//! search then refines every filter's frequency, gain, and Q at once
//! against the measurement.

use tracing::debug;

use crate::bell::{FilterBank, FilterParameter, frequency_response};
use crate::optim::{MinimizeOptions, nelder_mead};
use crate::peaks::{PeakOptions, find_peaks};

/// Lower edge of the band the fitter analyzes, in Hz.
pub const AUDIBLE_LOW_HZ: f64 = 20.0;
/// Upper edge of the band the fitter analyzes, in Hz.
pub const AUDIBLE_HIGH_HZ: f64 = 20_000.0;

/// How residuals between the modeled and measured curves reduce to one
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMetric {
    /// Sum of squared differences.
    SumSquares,
    /// Square root of the summed squared differences.
    #[default]
    RootSumSquares,
    /// Mean of the squared differences.
    MeanSquares,
}

impl ErrorMetric {
    /// Reduce two equal-length curves to a scalar residual.
    ///
    /// # Panics
    /// Panics if the curves differ in length.
    pub fn evaluate(self, a: &[f64], b: &[f64]) -> f64 {
        assert_eq!(a.len(), b.len(), "residual curves must have equal length");
        let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
        match self {
            ErrorMetric::SumSquares => sum,
            ErrorMetric::RootSumSquares => sum.sqrt(),
            ErrorMetric::MeanSquares => {
                if a.is_empty() {
                    0.0
                } else {
                    sum / a.len() as f64
                }
            }
        }
    }
}

/// Tuning for [`fit_filters`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Largest number of filters the fitter may return.
    pub max_filters: usize,
    /// Residual norm the optimizer minimizes.
    pub metric: ErrorMetric,
    /// Cost-evaluation budget per free parameter.
    pub evaluations_per_parameter: usize,
    /// Simplex coordinate spread convergence tolerance.
    pub x_tolerance: f64,
    /// Relative cost spread convergence tolerance.
    pub f_tolerance: f64,
    /// Minimum height above unity a peak must reach, in dB.
    pub min_peak_height_db: f64,
    /// Minimum spacing between seeded peaks in grid bins; `None` uses 1/32
    /// of the analyzed grid.
    pub min_peak_distance: Option<usize>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_filters: 4,
            metric: ErrorMetric::default(),
            evaluations_per_parameter: 400,
            x_tolerance: 1e-4,
            f_tolerance: 1e-6,
            min_peak_height_db: 0.5,
            min_peak_distance: None,
        }
    }
}

/// Result of a fitting run.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterFit {
    /// Fitted filters, sorted by ascending center frequency.
    pub filters: FilterBank,
    /// Whether the optimizer met its tolerances within the budget. When
    /// false, `filters` holds the best set found so far.
    pub converged: bool,
    /// Residual of the peak-seeded starting guess.
    pub initial_cost: f64,
    /// Residual of the returned filters.
    pub final_cost: f64,
    /// Cost evaluations spent.
    pub evaluations: usize,
}

/// Fit up to `options.max_filters` bell filters to a measured magnitude
/// curve.
///
/// `frequencies` must be ascending; `magnitudes` is the linear (not dB)
/// measured magnitude at each frequency. Analysis is restricted to
/// [`AUDIBLE_LOW_HZ`]..=[`AUDIBLE_HIGH_HZ`]. Each qualifying response peak
/// seeds one filter (center at the peak, gain from the peak height, Q of
/// 1), and a Nelder-Mead search refines all bands together in
/// (log2 frequency, dB gain, ln Q) coordinates. A curve with no qualifying
/// peaks fits an empty bank; that is a successful outcome, not an error.
///
/// # Panics
/// Panics if `frequencies` and `magnitudes` differ in length.
pub fn fit_filters(frequencies: &[f64], magnitudes: &[f64], options: &FitOptions) -> FilterFit {
    assert_eq!(
        frequencies.len(),
        magnitudes.len(),
        "one magnitude per frequency"
    );

    let lo = frequencies.partition_point(|&f| f < AUDIBLE_LOW_HZ);
    let hi = frequencies.partition_point(|&f| f <= AUDIBLE_HIGH_HZ);
    let freqs = &frequencies[lo..hi];
    let mags = &magnitudes[lo..hi];

    let peaks = if freqs.is_empty() {
        Vec::new()
    } else {
        let peak_options = PeakOptions {
            min_height: 10f64.powf(options.min_peak_height_db / 20.0),
            min_distance: options
                .min_peak_distance
                .unwrap_or_else(|| (freqs.len() / 32).max(1)),
        };
        find_peaks(mags, &peak_options)
    };

    if peaks.is_empty() || options.max_filters == 0 {
        debug!("no qualifying peaks, fitting an empty bank");
        return FilterFit {
            filters: Vec::new(),
            converged: true,
            initial_cost: 0.0,
            final_cost: 0.0,
            evaluations: 0,
        };
    }

    let mut start = Vec::new();
    let mut steps = Vec::new();
    for &peak in peaks.iter().take(options.max_filters) {
        start.push(freqs[peak].log2());
        start.push(20.0 * mags[peak].max(1e-10).log10());
        start.push(0.0); // ln Q, seeded at Q = 1
        steps.extend_from_slice(&[0.25, 1.0, 0.25]);
    }

    let metric = options.metric;
    let cost = |x: &[f64]| metric.evaluate(&frequency_response(&unpack(x), freqs), mags);
    let initial_cost = cost(&start);

    let minimize_options = MinimizeOptions {
        max_evaluations: options.evaluations_per_parameter * start.len(),
        x_tolerance: options.x_tolerance,
        f_tolerance: options.f_tolerance,
    };
    let result = nelder_mead(cost, &start, &steps, &minimize_options);

    let mut filters = unpack(&result.x);
    filters.sort_by(|a, b| {
        a.frequency
            .partial_cmp(&b.frequency)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!(
        filters = filters.len(),
        converged = result.converged,
        initial_cost,
        final_cost = result.cost,
        evaluations = result.evaluations,
        "filter fit finished"
    );

    FilterFit {
        filters,
        converged: result.converged,
        initial_cost,
        final_cost: result.cost,
        evaluations: result.evaluations,
    }
}

/// Decode the optimizer's flat parameter vector into filters.
fn unpack(x: &[f64]) -> FilterBank {
    x.chunks_exact(3)
        .map(|band| FilterParameter {
            frequency: band[0].exp2(),
            gain_db: band[1],
            q: band[2].exp(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_known_values() {
        let a = [0.0, 3.0, 4.0];
        let b = [0.0, 0.0, 0.0];
        assert!((ErrorMetric::SumSquares.evaluate(&a, &b) - 25.0).abs() < 1e-12);
        assert!((ErrorMetric::RootSumSquares.evaluate(&a, &b) - 5.0).abs() < 1e-12);
        assert!((ErrorMetric::MeanSquares.evaluate(&a, &b) - 25.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_metric_identical_curves() {
        let a = [1.0, 2.0, 3.0];
        assert!(ErrorMetric::RootSumSquares.evaluate(&a, &a).abs() < 1e-15);
    }

    #[test]
    fn test_metric_empty_curves() {
        assert!(ErrorMetric::SumSquares.evaluate(&[], &[]).abs() < 1e-15);
        assert!(ErrorMetric::MeanSquares.evaluate(&[], &[]).abs() < 1e-15);
    }

    #[test]
    #[should_panic]
    fn test_metric_length_mismatch_panics() {
        ErrorMetric::RootSumSquares.evaluate(&[1.0], &[1.0, 2.0]);
    }

    #[test]
    fn test_unpack_round_trips_coordinates() {
        let x = [1000f64.log2(), -4.5, 2.0f64.ln()];
        let bank = unpack(&x);
        assert_eq!(bank.len(), 1);
        assert!((bank[0].frequency - 1000.0).abs() < 1e-9);
        assert!((bank[0].gain_db + 4.5).abs() < 1e-12);
        assert!((bank[0].q - 2.0).abs() < 1e-12);
    }
}
