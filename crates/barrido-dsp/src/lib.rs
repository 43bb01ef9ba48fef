//! Sweep-based impulse response measurement core.
//!
//! This crate provides:
//!
//! - **Sweep synthesis**: [`SweepSignal`] generates logarithmic and linear
//!   sweep excitations and their matched inverse filters
//! - **Deconvolution**: [`SweepSignal::compute_ir`] recovers a system's
//!   impulse response from a recorded sweep response
//! - **Spectral analysis**: [`dft`], [`idft`], [`magnitude_db`], [`phase`],
//!   and [`convolve`] over real-valued signals
//! - **Frequency grids**: [`linear_bins`], [`log_bins`], and the
//!   [`map_log_to_linear_bins`] resampling between them
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use barrido_dsp::{SweepSignal, SweepSpec};
//!
//! // Describe the measurement
//! let spec = SweepSpec::new(48000.0, 2.0, 10.0, 22000.0)?;
//! let sweep = SweepSignal::logarithmic(spec);
//!
//! // Play sweep.generate() through the system, record the response...
//! let ir = sweep.compute_ir(&recorded);
//!
//! // The system's impulse response starts at the sweep-length offset
//! let onset = sweep.generate().len() - 1;
//! ```

pub mod axis;
pub mod convolve;
pub mod fft;
pub mod spectrum;
pub mod sweep;

pub use axis::{linear_bins, log_bins, map_log_to_linear_bins};
pub use convolve::convolve;
pub use fft::{dft, idft, magnitude, magnitude_db, phase};
pub use spectrum::{LogSpectrum, log_magnitude};
pub use sweep::{SweepKind, SweepSignal, SweepSpec};

/// Error types for measurement configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Sample rate must be a positive, finite number of Hz.
    #[error("Invalid sample rate: {0} Hz (must be positive)")]
    InvalidSampleRate(f64),

    /// Sweep duration must be a positive, finite number of seconds.
    #[error("Invalid sweep duration: {0} s (must be positive)")]
    InvalidDuration(f64),

    /// The sweep range must satisfy `0 < lower < upper <= Nyquist`.
    #[error("Invalid frequency range [{lower} Hz, {upper} Hz]: need 0 < lower < upper <= {nyquist} Hz")]
    InvalidFrequencyRange {
        /// Requested sweep start frequency in Hz.
        lower: f64,
        /// Requested sweep end frequency in Hz.
        upper: f64,
        /// Half the requested sample rate in Hz.
        nyquist: f64,
    },
}

/// Convenience result type for measurement configuration.
pub type Result<T> = std::result::Result<T, Error>;
