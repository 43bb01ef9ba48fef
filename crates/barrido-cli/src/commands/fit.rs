//! Parametric EQ fitting command.

use std::path::{Path, PathBuf};

use barrido_dsp::log_magnitude;
use barrido_eq::{ErrorMetric, FilterBank, FitOptions, fit_filters};
use barrido_io::{import_response, read_wav};
use clap::{Args, ValueEnum};

use super::common::spinner;

/// Residual norms for CLI selection.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliMetric {
    SumSquares,
    #[default]
    RootSumSquares,
    MeanSquares,
}

impl From<CliMetric> for ErrorMetric {
    fn from(metric: CliMetric) -> Self {
        match metric {
            CliMetric::SumSquares => ErrorMetric::SumSquares,
            CliMetric::RootSumSquares => ErrorMetric::RootSumSquares,
            CliMetric::MeanSquares => ErrorMetric::MeanSquares,
        }
    }
}

#[derive(Args)]
pub struct FitArgs {
    /// Measured response: an impulse response WAV file or a freq,mag,db
    /// CSV export
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Largest number of filters to fit
    #[arg(long, default_value = "4")]
    max_filters: usize,

    /// Logarithmic grid size used when the input is a WAV file
    #[arg(long, default_value = "512")]
    bins: usize,

    /// Residual norm to minimize
    #[arg(long, value_enum, default_value = "root-sum-squares")]
    metric: CliMetric,

    /// Output report file (.json or .toml); omit to print only
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Fit report written to disk.
///
/// `filters` stays last so the TOML rendering keeps scalar keys ahead of
/// the array of tables.
#[derive(serde::Serialize)]
struct FitReport {
    converged: bool,
    initial_cost: f64,
    final_cost: f64,
    evaluations: usize,
    filters: FilterBank,
}

pub fn run(args: FitArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (frequencies, magnitudes) = load_response(&args.input, args.bins)?;
    println!("  {} frequency bins", frequencies.len());

    let options = FitOptions {
        max_filters: args.max_filters,
        metric: args.metric.into(),
        ..FitOptions::default()
    };

    let pb = spinner("Fitting bell filters");
    let fit = fit_filters(&frequencies, &magnitudes, &options);
    pb.finish_with_message("done");

    if fit.filters.is_empty() {
        println!("\nNo response peaks above threshold; nothing to fit.");
    } else {
        println!("\nFitted {} filter(s):", fit.filters.len());
        println!("  {:>10}  {:>8}  {:>6}", "Freq (Hz)", "Gain (dB)", "Q");
        println!("  {:>10}  {:>8}  {:>6}", "---------", "---------", "-----");
        for filter in &fit.filters {
            println!(
                "  {:>10.1}  {:>8.2}  {:>6.2}",
                filter.frequency, filter.gain_db, filter.q
            );
        }
        println!(
            "\n  Residual: {:.6} -> {:.6} in {} evaluations{}",
            fit.initial_cost,
            fit.final_cost,
            fit.evaluations,
            if fit.converged {
                ""
            } else {
                " (budget exhausted)"
            }
        );
    }

    if let Some(output_path) = args.output {
        let report = FitReport {
            converged: fit.converged,
            initial_cost: fit.initial_cost,
            final_cost: fit.final_cost,
            evaluations: fit.evaluations,
            filters: fit.filters,
        };
        let rendered = if extension_is(&output_path, "toml") {
            toml::to_string_pretty(&report)?
        } else {
            serde_json::to_string_pretty(&report)?
        };
        std::fs::write(&output_path, rendered)?;
        println!("\nWrote report to {}", output_path.display());
    }

    Ok(())
}

/// Load a measured response as (frequencies, linear magnitudes).
///
/// WAV inputs are reduced to a logarithmic magnitude grid capped at
/// Nyquist; anything else is parsed as a response CSV.
fn load_response(path: &Path, bins: usize) -> anyhow::Result<(Vec<f64>, Vec<f64>)> {
    if extension_is(path, "wav") {
        let (ir, sample_rate) = read_wav(path)?;
        let upper = (f64::from(sample_rate) / 2.0).min(20_000.0);
        let spectrum = log_magnitude(&ir, f64::from(sample_rate), bins, 20.0, upper);
        let linear = spectrum
            .magnitudes_db
            .iter()
            .map(|db| 10f64.powf(db / 20.0))
            .collect();
        Ok((spectrum.frequencies, linear))
    } else {
        Ok(import_response(path)?)
    }
}

fn extension_is(path: &Path, wanted: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}
