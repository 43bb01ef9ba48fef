//! Real-input DFT with an even-length output convention.
//!
//! The forward transform keeps only the `N/2 + 1` non-redundant bins of a
//! real signal; odd-length input is padded with one trailing zero first, so
//! the inverse always reconstructs an even number of samples.

use rustfft::{FftPlanner, num_complex::Complex};

/// Forward transform of a real signal.
///
/// Returns the `N/2 + 1` half-spectrum bins for the (possibly padded) even
/// length `N`. An empty input produces an empty spectrum.
pub fn dft(input: &[f64]) -> Vec<Complex<f64>> {
    if input.is_empty() {
        return Vec::new();
    }
    let n = input.len() + input.len() % 2;
    let mut buffer: Vec<Complex<f64>> = input.iter().map(|&x| Complex::new(x, 0.0)).collect();
    buffer.resize(n, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(n).process(&mut buffer);

    buffer.truncate(n / 2 + 1);
    buffer
}

/// Inverse transform of a half-spectrum back to a real signal.
///
/// Expects bins produced by [`dft`] and reconstructs the even length
/// `2 * (bins - 1)`, normalizing by the output length. Spectra with fewer
/// than two bins produce an empty signal.
pub fn idft(spectrum: &[Complex<f64>]) -> Vec<f64> {
    if spectrum.len() < 2 {
        return Vec::new();
    }
    let n = 2 * (spectrum.len() - 1);
    let mut buffer: Vec<Complex<f64>> = Vec::with_capacity(n);
    buffer.extend_from_slice(spectrum);
    // Mirror the interior bins as conjugates for the negative frequencies.
    for i in (1..spectrum.len() - 1).rev() {
        buffer.push(spectrum[i].conj());
    }
    debug_assert_eq!(buffer.len(), n);

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_inverse(n).process(&mut buffer);

    let scale = 1.0 / n as f64;
    buffer.iter().map(|c| c.re * scale).collect()
}

/// Linear magnitude of each half-spectrum bin of a real signal.
pub fn magnitude(input: &[f64]) -> Vec<f64> {
    dft(input).iter().map(|c| c.norm()).collect()
}

/// Magnitude of each half-spectrum bin in dB, floored at -200 dB.
pub fn magnitude_db(input: &[f64]) -> Vec<f64> {
    magnitude(input)
        .iter()
        .map(|&m| 20.0 * m.max(1e-10).log10())
        .collect()
}

/// Phase of each half-spectrum bin in radians.
pub fn phase(input: &[f64]) -> Vec<f64> {
    dft(input).iter().map(|c| c.arg()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_dft_known_bins() {
        let spectrum = dft(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(spectrum.len(), 3);
        assert!((spectrum[0].re - 10.0).abs() < 1e-12);
        assert!(spectrum[0].im.abs() < 1e-12);
        assert!((spectrum[1].re + 2.0).abs() < 1e-12);
        assert!((spectrum[1].im - 2.0).abs() < 1e-12);
        assert!((spectrum[2].re + 2.0).abs() < 1e-12);
        assert!(spectrum[2].im.abs() < 1e-12);
    }

    #[test]
    fn test_odd_input_is_zero_padded() {
        let odd = dft(&[1.0, 2.0, 3.0]);
        let even = dft(&[1.0, 2.0, 3.0, 0.0]);
        assert_eq!(odd.len(), 3);
        assert_eq!(odd.len(), even.len());
        for (a, b) in odd.iter().zip(even.iter()) {
            assert!((a - b).norm() < 1e-12, "padded bins differ: {} vs {}", a, b);
        }
    }

    #[test]
    fn test_empty_input_empty_spectrum() {
        assert!(dft(&[]).is_empty());
        assert!(idft(&[]).is_empty());
        assert!(magnitude(&[]).is_empty());
        assert!(phase(&[]).is_empty());
    }

    #[test]
    fn test_roundtrip_even_signal() {
        let n = 256;
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 5.0 * i as f64 / n as f64).sin())
            .collect();
        let recovered = idft(&dft(&signal));
        assert_eq!(recovered.len(), n);
        for (i, (a, b)) in signal.iter().zip(recovered.iter()).enumerate() {
            assert!((a - b).abs() < 1e-9, "sample {}: {} vs {}", i, a, b);
        }
    }

    #[test]
    fn test_roundtrip_pads_odd_signal() {
        let signal = [0.5, -1.0, 0.25];
        let recovered = idft(&dft(&signal));
        assert_eq!(recovered.len(), 4);
        for (i, a) in signal.iter().enumerate() {
            assert!((a - recovered[i]).abs() < 1e-12);
        }
        assert!(recovered[3].abs() < 1e-12);
    }

    #[test]
    fn test_magnitude_known_values() {
        let mags = magnitude(&[1.0, 2.0, 3.0, 4.0]);
        assert!((mags[0] - 10.0).abs() < 1e-12);
        assert!((mags[1] - 8.0f64.sqrt()).abs() < 1e-12);
        assert!((mags[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_magnitude_db_floor() {
        let db = magnitude_db(&[0.0, 0.0, 0.0, 0.0]);
        for value in db {
            assert!((value + 200.0).abs() < 1e-9, "floor should be -200 dB, got {}", value);
        }
    }

    #[test]
    fn test_phase_known_values() {
        let ph = phase(&[1.0, 2.0, 3.0, 4.0]);
        assert!(ph[0].abs() < 1e-12);
        assert!((ph[1] - 3.0 * PI / 4.0).abs() < 1e-12);
        // A signed zero in the Nyquist bin flips atan2 between pi and -pi.
        assert!((ph[2].abs() - PI).abs() < 1e-12);
    }
}
