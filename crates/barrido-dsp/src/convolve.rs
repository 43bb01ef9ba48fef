//! Linear convolution via zero-padded spectral multiplication.

use rustfft::num_complex::Complex;

use crate::fft::{dft, idft};

/// Full linear convolution of two real signals.
///
/// The result has length `a.len() + b.len() - 1`. Both inputs are
/// zero-padded to that length rounded up to even, transformed, multiplied
/// bin by bin, and inverse-transformed; the even-rounding slot carries no
/// signal and is truncated away. If either input is empty the result is
/// empty.
pub fn convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let out_len = a.len() + b.len() - 1;
    let padded = out_len + out_len % 2;

    let mut a_padded = a.to_vec();
    a_padded.resize(padded, 0.0);
    let mut b_padded = b.to_vec();
    b_padded.resize(padded, 0.0);

    let a_spectrum = dft(&a_padded);
    let b_spectrum = dft(&b_padded);
    debug_assert_eq!(a_spectrum.len(), b_spectrum.len());

    let product: Vec<Complex<f64>> = a_spectrum
        .iter()
        .zip(b_spectrum.iter())
        .map(|(x, y)| x * y)
        .collect();

    let mut output = idft(&product);
    output.truncate(out_len);
    output
}
