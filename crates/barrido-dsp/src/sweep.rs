//! Sweep specification, synthesis, and deconvolution.
//!
//! [`SweepSpec`] validates a measurement configuration up front;
//! [`SweepSignal`] synthesizes the excitation and its matched inverse
//! filter on first use, caches both, and deconvolves recorded responses
//! back into impulse responses. A `SweepSignal` is `Sync`, so one instance
//! can drive playback and analysis from different threads.

use std::f64::consts::PI;
use std::sync::OnceLock;

use crate::convolve::convolve;
use crate::{Error, Result};

/// Validated sweep measurement configuration.
///
/// Construction checks every invariant once: a positive sample rate and
/// duration, and `0 < lower < upper <= sample_rate / 2`. Out-of-order or
/// out-of-range values are rejected, never clamped or swapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSpec {
    sample_rate: f64,
    duration: f64,
    lower_hz: f64,
    upper_hz: f64,
}

impl SweepSpec {
    /// Validate a sweep configuration.
    pub fn new(sample_rate: f64, duration: f64, lower_hz: f64, upper_hz: f64) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Error::InvalidSampleRate(sample_rate));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(Error::InvalidDuration(duration));
        }
        let nyquist = sample_rate / 2.0;
        if !lower_hz.is_finite()
            || !upper_hz.is_finite()
            || lower_hz <= 0.0
            || lower_hz >= upper_hz
            || upper_hz > nyquist
        {
            return Err(Error::InvalidFrequencyRange {
                lower: lower_hz,
                upper: upper_hz,
                nyquist,
            });
        }
        Ok(Self { sample_rate, duration, lower_hz, upper_hz })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Sweep duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Sweep start frequency in Hz.
    pub fn lower_hz(&self) -> f64 {
        self.lower_hz
    }

    /// Sweep end frequency in Hz.
    pub fn upper_hz(&self) -> f64 {
        self.upper_hz
    }

    /// Half the sample rate in Hz.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Number of samples in the synthesized sweep.
    pub fn num_samples(&self) -> usize {
        (self.sample_rate * self.duration).ceil() as usize
    }
}

/// The family of sweep to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepKind {
    /// Exponential chirp spending equal time per octave.
    #[default]
    Logarithmic,
    /// Constant-rate chirp spending equal time per Hz.
    Linear,
}

/// A sweep excitation and its matched inverse filter.
///
/// Both signals are synthesized lazily and cached; repeated calls return
/// the same samples. [`generate`](Self::generate) and
/// [`inverse_filter`](Self::inverse_filter) may be called in either order.
#[derive(Debug)]
pub struct SweepSignal {
    spec: SweepSpec,
    kind: SweepKind,
    forward: OnceLock<Vec<f64>>,
    inverse: OnceLock<Vec<f64>>,
}

impl SweepSignal {
    /// Create a sweep of the given kind.
    pub fn new(spec: SweepSpec, kind: SweepKind) -> Self {
        Self {
            spec,
            kind,
            forward: OnceLock::new(),
            inverse: OnceLock::new(),
        }
    }

    /// Logarithmic sweep for `spec`.
    pub fn logarithmic(spec: SweepSpec) -> Self {
        Self::new(spec, SweepKind::Logarithmic)
    }

    /// Linear sweep for `spec`.
    pub fn linear(spec: SweepSpec) -> Self {
        Self::new(spec, SweepKind::Linear)
    }

    /// The configuration this sweep was built from.
    pub fn spec(&self) -> &SweepSpec {
        &self.spec
    }

    /// The sweep family.
    pub fn kind(&self) -> SweepKind {
        self.kind
    }

    /// The excitation signal, synthesized on first call and cached.
    pub fn generate(&self) -> &[f64] {
        self.forward
            .get_or_init(|| synthesize(&self.spec, self.kind))
    }

    /// The time-reversed, amplitude-weighted inverse filter, synthesized on
    /// first call and cached.
    pub fn inverse_filter(&self) -> &[f64] {
        self.inverse.get_or_init(|| {
            let mut inverse = self.generate().to_vec();
            apply_inverse_weights(&mut inverse, &self.spec, self.kind);
            inverse.reverse();
            inverse
        })
    }

    /// Deconvolve a recorded sweep response into an impulse response.
    ///
    /// The system's response begins at offset `num_samples - 1` of the
    /// result, where the sweep and its reversed inverse align. The
    /// recording must have been captured at the spec's sample rate; that
    /// contract cannot be checked from the samples alone.
    pub fn compute_ir(&self, response: &[f64]) -> Vec<f64> {
        convolve(response, self.inverse_filter())
    }

    /// Drop both cached signals so the next call re-synthesizes them.
    pub fn reset(&mut self) {
        self.forward = OnceLock::new();
        self.inverse = OnceLock::new();
    }
}

fn synthesize(spec: &SweepSpec, kind: SweepKind) -> Vec<f64> {
    let n = spec.num_samples();
    let fs = spec.sample_rate();
    match kind {
        SweepKind::Logarithmic => {
            let k = octave_rate(spec);
            let ln_k = k.ln();
            let scale = 2.0 * PI * spec.lower_hz() / ln_k;
            (0..n)
                .map(|i| (scale * (k.powf(i as f64 / fs) - 1.0)).sin())
                .collect()
        }
        SweepKind::Linear => {
            let k = (spec.upper_hz() - spec.lower_hz()) / spec.duration();
            (0..n)
                .map(|i| {
                    let t = i as f64 / fs;
                    (2.0 * PI * (0.5 * k * t * t + spec.lower_hz() * t)).sin()
                })
                .collect()
        }
    }
}

/// Frequency ratio per second: `(upper / lower)^(1 / duration)`.
fn octave_rate(spec: &SweepSpec) -> f64 {
    (spec.upper_hz() / spec.lower_hz()).powf(1.0 / spec.duration())
}

fn apply_inverse_weights(samples: &mut [f64], spec: &SweepSpec, kind: SweepKind) {
    let fs = spec.sample_rate();
    match kind {
        SweepKind::Logarithmic => {
            let k = octave_rate(spec);
            let n = samples.len() as f64;
            // Reciprocal of the geometric series sum of k^(i/fs) over the
            // sweep, so the deconvolved impulse comes out at unit height.
            let factor = (1.0 - k.powf(1.0 / fs)) / (1.0 - k.powf(n / fs));
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample *= 2.0 * factor * k.powf(i as f64 / fs);
            }
        }
        SweepKind::Linear => {
            for sample in samples.iter_mut() {
                *sample /= fs;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_log_sweep() -> SweepSignal {
        let spec = SweepSpec::new(1000.0, 0.1, 10.0, 400.0).unwrap();
        SweepSignal::logarithmic(spec)
    }

    #[test]
    fn test_spec_rejects_bad_sample_rate() {
        assert!(matches!(
            SweepSpec::new(0.0, 1.0, 20.0, 200.0),
            Err(Error::InvalidSampleRate(_))
        ));
        assert!(matches!(
            SweepSpec::new(-44100.0, 1.0, 20.0, 200.0),
            Err(Error::InvalidSampleRate(_))
        ));
        assert!(matches!(
            SweepSpec::new(f64::NAN, 1.0, 20.0, 200.0),
            Err(Error::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn test_spec_rejects_bad_duration() {
        assert!(matches!(
            SweepSpec::new(44100.0, 0.0, 20.0, 200.0),
            Err(Error::InvalidDuration(_))
        ));
        assert!(matches!(
            SweepSpec::new(44100.0, -2.0, 20.0, 200.0),
            Err(Error::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_spec_rejects_bad_range() {
        // Inverted bounds are an error, not silently reordered.
        assert!(matches!(
            SweepSpec::new(44100.0, 1.0, 200.0, 20.0),
            Err(Error::InvalidFrequencyRange { .. })
        ));
        assert!(matches!(
            SweepSpec::new(44100.0, 1.0, 0.0, 200.0),
            Err(Error::InvalidFrequencyRange { .. })
        ));
        assert!(matches!(
            SweepSpec::new(44100.0, 1.0, 20.0, 20.0),
            Err(Error::InvalidFrequencyRange { .. })
        ));
        assert!(matches!(
            SweepSpec::new(44100.0, 1.0, 20.0, 30000.0),
            Err(Error::InvalidFrequencyRange { .. })
        ));
    }

    #[test]
    fn test_spec_allows_sweep_to_nyquist() {
        let spec = SweepSpec::new(44100.0, 1.0, 20.0, 22050.0).unwrap();
        assert!((spec.upper_hz() - spec.nyquist()).abs() < 1e-12);
    }

    #[test]
    fn test_num_samples_rounds_up() {
        let spec = SweepSpec::new(44100.0, 2.5, 1.0, 22050.0).unwrap();
        assert_eq!(spec.num_samples(), 110250);
        let fractional = SweepSpec::new(1000.0, 0.0105, 10.0, 400.0).unwrap();
        assert_eq!(fractional.num_samples(), 11);
    }

    #[test]
    fn test_log_sweep_known_samples() {
        let sweep = small_log_sweep();
        let forward = sweep.generate();
        assert_eq!(forward.len(), 100);
        assert!(forward[0].abs() < 1e-15);
        assert!((forward[1] - 0.0639614389860854).abs() < 1e-12);
        assert!((forward[13] - 0.866485843066283).abs() < 1e-12);
        assert!((forward[50] - 0.34813675076845).abs() < 1e-12);
        assert!((forward[99] - 0.903765034159139).abs() < 1e-12);
    }

    #[test]
    fn test_log_inverse_known_samples() {
        let sweep = small_log_sweep();
        let inverse = sweep.inverse_filter();
        assert_eq!(inverse.len(), 100);
        assert!((inverse[0] - 0.067141293262767).abs() < 1e-12);
        assert!((inverse[1] + 0.0679391020309217).abs() < 1e-12);
        assert!((inverse[50] - 0.00796998444090926).abs() < 1e-12);
        // The reversed first sweep sample is sin(0).
        assert!(inverse[99].abs() < 1e-15);
    }

    #[test]
    fn test_linear_sweep_known_samples() {
        let spec = SweepSpec::new(1000.0, 0.1, 10.0, 400.0).unwrap();
        let sweep = SweepSignal::linear(spec);
        let forward = sweep.generate();
        assert_eq!(forward.len(), 100);
        assert!((forward[1] - 0.0750135351083049).abs() < 1e-12);
        assert!((forward[25] - 0.195090322016128).abs() < 1e-12);
        assert!((forward[50] - 0.707106781186544).abs() < 1e-12);
        assert!((forward[99] - 0.597653133861124).abs() < 1e-12);

        let inverse = sweep.inverse_filter();
        assert!((inverse[0] - 0.000597653133861124).abs() < 1e-15);
        assert!((inverse[10] - 0.000857688229819765).abs() < 1e-15);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let mut sweep = small_log_sweep();
        let first = sweep.generate().to_vec();
        let second = sweep.generate().to_vec();
        assert_eq!(first, second);

        sweep.reset();
        let after_reset = sweep.generate().to_vec();
        assert_eq!(first, after_reset);
    }

    #[test]
    fn test_call_order_does_not_matter() {
        let forward_first = small_log_sweep();
        forward_first.generate();
        let inverse_a = forward_first.inverse_filter().to_vec();

        let inverse_first = small_log_sweep();
        let inverse_b = inverse_first.inverse_filter().to_vec();
        inverse_first.generate();

        assert_eq!(inverse_a, inverse_b);
        assert_eq!(forward_first.generate(), inverse_first.generate());
    }

    #[test]
    fn test_sweep_signal_is_shareable() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<SweepSignal>();
    }
}
