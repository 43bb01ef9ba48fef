//! Spectral analysis commands.

use std::path::PathBuf;

use barrido_dsp::{linear_bins, log_magnitude, magnitude, phase};
use barrido_io::{export_response, read_wav};
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    command: AnalyzeCommand,
}

#[derive(Subcommand)]
enum AnalyzeCommand {
    /// Export the full-resolution magnitude spectrum of an impulse response
    Spectrum {
        /// Input impulse response WAV file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output CSV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Resample the magnitude response onto a logarithmic frequency grid
    Response {
        /// Input impulse response WAV file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Number of logarithmic bins
        #[arg(long, default_value = "1024")]
        bins: usize,

        /// Grid start frequency in Hz
        #[arg(long, default_value = "20.0")]
        lower: f64,

        /// Grid end frequency in Hz
        #[arg(long, default_value = "20000.0")]
        upper: f64,

        /// Output CSV file; omit to print a peak summary instead
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show top N peaks when printing
        #[arg(long, default_value = "10")]
        peaks: usize,
    },

    /// Export the phase spectrum of an impulse response
    Phase {
        /// Input impulse response WAV file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output CSV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    match args.command {
        AnalyzeCommand::Spectrum { input, output } => {
            println!("Analyzing spectrum of {}...", input.display());

            let (ir, sample_rate) = read_wav(&input)?;
            println!(
                "  {} samples, {} Hz, {:.3}s",
                ir.len(),
                sample_rate,
                ir.len() as f64 / f64::from(sample_rate)
            );

            let mags = magnitude(&ir);
            if mags.is_empty() {
                anyhow::bail!("Impulse response {} has no samples", input.display());
            }
            let frequencies = linear_bins(f64::from(sample_rate), 2 * (mags.len() - 1));

            export_response(&output, &frequencies[..mags.len()], &mags)?;
            println!("Wrote {} bins to {}", mags.len(), output.display());
        }

        AnalyzeCommand::Response {
            input,
            bins,
            lower,
            upper,
            output,
            peaks,
        } => {
            println!("Analyzing response of {}...", input.display());

            let (ir, sample_rate) = read_wav(&input)?;
            println!(
                "  {} samples, {} Hz, {:.3}s",
                ir.len(),
                sample_rate,
                ir.len() as f64 / f64::from(sample_rate)
            );

            let spectrum = log_magnitude(&ir, f64::from(sample_rate), bins, lower, upper);

            if let Some(output_path) = output {
                // export_response expects linear magnitude and derives
                // the dB column itself.
                let linear: Vec<f64> = spectrum
                    .magnitudes_db
                    .iter()
                    .map(|db| 10f64.powf(db / 20.0))
                    .collect();
                export_response(&output_path, &spectrum.frequencies, &linear)?;
                println!(
                    "Wrote {} bins to {}",
                    spectrum.frequencies.len(),
                    output_path.display()
                );
            } else {
                let mut indexed: Vec<(f64, f64)> = spectrum
                    .frequencies
                    .iter()
                    .copied()
                    .zip(spectrum.magnitudes_db.iter().copied())
                    .collect();
                indexed.sort_by(|a, b| b.1.total_cmp(&a.1));

                println!("\nTop {} levels:", peaks);
                println!("  {:>10}  {:>10}", "Freq (Hz)", "Level (dB)");
                println!("  {:>10}  {:>10}", "---------", "----------");
                for (freq, level) in indexed.iter().take(peaks) {
                    println!("  {:>10.1}  {:>10.2}", freq, level);
                }
            }
        }

        AnalyzeCommand::Phase { input, output } => {
            println!("Analyzing phase of {}...", input.display());

            let (ir, sample_rate) = read_wav(&input)?;
            let phases = phase(&ir);
            if phases.is_empty() {
                anyhow::bail!("Impulse response {} has no samples", input.display());
            }
            let frequencies = linear_bins(f64::from(sample_rate), 2 * (phases.len() - 1));

            let mut csv = String::new();
            csv.push_str("frequency_hz,phase_rad\n");
            for (freq, ph) in frequencies.iter().zip(phases.iter()) {
                csv.push_str(&format!("{freq},{ph}\n"));
            }
            std::fs::write(&output, csv)?;
            println!("Wrote {} bins to {}", phases.len(), output.display());
        }
    }

    Ok(())
}
