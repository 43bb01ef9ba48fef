//! Shared CLI helpers used across multiple commands.

use std::path::PathBuf;
use std::time::Duration;

use barrido_dsp::SweepSignal;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{ConfigSweepKind, SessionConfig};

/// Sweep parameters accepted by every command that needs a sweep.
///
/// A `--config` file supplies the baseline; individual flags override
/// single fields on top of it.
#[derive(Args)]
pub struct SweepOpts {
    /// Session config file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Sweep duration in seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// Start frequency in Hz
    #[arg(long)]
    pub lower: Option<f64>,

    /// End frequency in Hz
    #[arg(long)]
    pub upper: Option<f64>,

    /// Sweep family
    #[arg(long, value_enum)]
    pub kind: Option<ConfigSweepKind>,
}

impl SweepOpts {
    /// Resolve the effective session config: file (or defaults), then
    /// flag overrides.
    pub fn session(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::load(path)?,
            None => SessionConfig::default(),
        };

        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        if let Some(duration) = self.duration {
            config.duration = duration;
        }
        if let Some(lower) = self.lower {
            config.lower_hz = lower;
        }
        if let Some(upper) = self.upper {
            config.upper_hz = upper;
        }
        if let Some(kind) = self.kind {
            config.kind = kind;
        }

        Ok(config)
    }

    /// Build the sweep signal described by the resolved config.
    pub fn sweep(&self) -> anyhow::Result<(SessionConfig, SweepSignal)> {
        let config = self.session()?;
        let spec = config.to_spec()?;
        Ok((config, SweepSignal::new(spec, config.kind.into())))
    }
}

/// Start a steady-tick spinner for a long-running step.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} [{elapsed_precise}]")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "sample_rate = 44100\nduration = 4.0\n").unwrap();

        let opts = SweepOpts {
            config: Some(file.path().to_path_buf()),
            sample_rate: None,
            duration: Some(1.0),
            lower: None,
            upper: Some(20_000.0),
            kind: Some(ConfigSweepKind::Linear),
        };

        let config = opts.session().unwrap();
        assert_eq!(config.sample_rate, 44_100);
        assert!((config.duration - 1.0).abs() < 1e-12);
        assert!((config.lower_hz - 10.0).abs() < 1e-12);
        assert!((config.upper_hz - 20_000.0).abs() < 1e-12);
        assert_eq!(config.kind, ConfigSweepKind::Linear);
    }

    #[test]
    fn test_defaults_without_config_file() {
        let opts = SweepOpts {
            config: None,
            sample_rate: None,
            duration: None,
            lower: None,
            upper: None,
            kind: None,
        };
        assert_eq!(opts.session().unwrap(), SessionConfig::default());
    }
}
