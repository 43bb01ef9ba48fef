//! File I/O for sweep measurements.
//!
//! This crate provides:
//!
//! - **WAV audio**: [`read_wav`] and [`write_wav`] for excitation signals,
//!   recorded responses, and impulse responses
//! - **Response tables**: [`export_response`] and [`import_response`] for
//!   the flat `freq,mag,db` CSV exchange format
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use barrido_io::{read_wav, write_wav};
//!
//! let (response, sample_rate) = read_wav("response.wav")?;
//! // ... deconvolve ...
//! write_wav("ir.wav", &ir, sample_rate)?;
//! ```

mod csv;
mod wav;

pub use csv::{export_response, import_response};
pub use wav::{read_wav, write_wav};

/// Error types for measurement file I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A response CSV did not match the expected `freq,mag,db` shape.
    #[error("Malformed response CSV: {0}")]
    MalformedCsv(String),
}

/// Convenience result type for measurement file I/O.
pub type Result<T> = std::result::Result<T, Error>;
