//! Closed-form magnitude response of parametric bell filters.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// One parametric bell (peaking) filter band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParameter {
    /// Center frequency in Hz.
    pub frequency: f64,
    /// Boost (positive) or cut (negative) at the center, in dB.
    pub gain_db: f64,
    /// Quality factor controlling bandwidth; must be positive.
    pub q: f64,
}

/// An ordered set of bell filters.
///
/// Bands compose multiplicatively, so their order never changes the
/// combined response.
pub type FilterBank = Vec<FilterParameter>;

/// Magnitude of one bell filter at `frequency_hz`.
///
/// Evaluates `|H(s)| = |(s^2 + (A*w0/Q)s + w0^2) / (s^2 + (w0/Q)s + w0^2)|`
/// on the imaginary axis `s = jw`, with linear center gain
/// `A = 10^(gain_db / 20)`.
pub fn bell_magnitude(filter: &FilterParameter, frequency_hz: f64) -> f64 {
    let w = 2.0 * PI * frequency_hz;
    let w0 = 2.0 * PI * filter.frequency;
    let gain = 10f64.powf(filter.gain_db / 20.0);

    // s^2 + w0^2 is real on the imaginary axis; the damping term is not.
    let real = w0 * w0 - w * w;
    let num_im = gain * w0 / filter.q * w;
    let den_im = w0 / filter.q * w;
    ((real * real + num_im * num_im) / (real * real + den_im * den_im)).sqrt()
}

/// Combined magnitude response of a filter bank across `frequencies`.
///
/// An empty bank yields unity gain everywhere; an empty frequency list
/// yields an empty response.
pub fn frequency_response(filters: &[FilterParameter], frequencies: &[f64]) -> Vec<f64> {
    let mut response = vec![1.0; frequencies.len()];
    for filter in filters {
        for (value, &frequency) in response.iter_mut().zip(frequencies.iter()) {
            *value *= bell_magnitude(filter, frequency);
        }
    }
    response
}
