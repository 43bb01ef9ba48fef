//! Parametric EQ modeling for measured frequency responses.
//!
//! This crate provides:
//!
//! - **Bell filters**: [`FilterParameter`] and the closed-form
//!   [`frequency_response`] of a bank of parametric bells
//! - **Peak detection**: [`find_peaks`] for locating response maxima
//! - **Fitting**: [`fit_filters`] matches a small filter bank to a measured
//!   magnitude curve with a derivative-free simplex search
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use barrido_eq::{FitOptions, fit_filters};
//!
//! // frequencies ascending in Hz, magnitudes linear (not dB)
//! let fit = fit_filters(&frequencies, &magnitudes, &FitOptions::default());
//! for filter in &fit.filters {
//!     println!("{:.0} Hz  {:+.1} dB  Q {:.2}", filter.frequency, filter.gain_db, filter.q);
//! }
//! ```

pub mod bell;
pub mod fit;
pub mod optim;
pub mod peaks;

pub use bell::{FilterBank, FilterParameter, bell_magnitude, frequency_response};
pub use fit::{AUDIBLE_HIGH_HZ, AUDIBLE_LOW_HZ, ErrorMetric, FilterFit, FitOptions, fit_filters};
pub use optim::{Minimization, MinimizeOptions, nelder_mead};
pub use peaks::{PeakOptions, find_peaks};
