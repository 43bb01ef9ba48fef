//! Measurement session configuration.
//!
//! A TOML file carries the sweep parameters shared by the generate,
//! simulate, and measure commands so one measurement session stays
//! consistent across invocations:
//!
//! ```toml
//! sample_rate = 48000
//! duration = 2.0
//! lower_hz = 10.0
//! upper_hz = 22000.0
//! response_tail = 1.0
//! kind = "logarithmic"
//! ```

use std::path::Path;

use barrido_dsp::{SweepKind, SweepSpec};
use serde::{Deserialize, Serialize};

/// Sweep parameters for one measurement session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Sweep duration in seconds.
    pub duration: f64,
    /// Sweep start frequency in Hz.
    pub lower_hz: f64,
    /// Sweep end frequency in Hz.
    pub upper_hz: f64,
    /// Seconds of room tail kept after the sweep ends when trimming a
    /// measured impulse response.
    pub response_tail: f64,
    /// Sweep family.
    pub kind: ConfigSweepKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            duration: 2.0,
            lower_hz: 10.0,
            upper_hz: 22_000.0,
            response_tail: 1.0,
            kind: ConfigSweepKind::Logarithmic,
        }
    }
}

/// Sweep family names as they appear in config files and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSweepKind {
    /// Exponential chirp.
    #[default]
    Logarithmic,
    /// Constant-rate chirp.
    Linear,
}

impl From<ConfigSweepKind> for SweepKind {
    fn from(kind: ConfigSweepKind) -> Self {
        match kind {
            ConfigSweepKind::Logarithmic => SweepKind::Logarithmic,
            ConfigSweepKind::Linear => SweepKind::Linear,
        }
    }
}

impl SessionConfig {
    /// Load a session config from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&text)?)
    }

    /// Validate the sweep parameters into a spec.
    pub fn to_spec(self) -> anyhow::Result<SweepSpec> {
        Ok(SweepSpec::new(
            f64::from(self.sample_rate),
            self.duration,
            self.lower_hz,
            self.upper_hz,
        )?)
    }
}
