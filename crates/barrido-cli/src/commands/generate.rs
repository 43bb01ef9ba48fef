//! Sweep excitation generation command.

use std::path::PathBuf;

use barrido_io::write_wav;
use clap::Args;

use super::common::SweepOpts;

#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file for the sweep
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    sweep: SweepOpts,

    /// Playback amplitude (0-1)
    #[arg(long, default_value = "0.8")]
    amplitude: f64,

    /// Also write the inverse filter to this WAV file
    #[arg(long)]
    inverse: Option<PathBuf>,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let (config, signal) = args.sweep.sweep()?;

    let kind_name = format!("{:?}", signal.kind()).to_lowercase();
    println!("Generating {} sweep...", kind_name);
    println!(
        "  {} Hz to {} Hz over {:.2}s at {} Hz",
        config.lower_hz, config.upper_hz, config.duration, config.sample_rate
    );

    let samples: Vec<f64> = signal
        .generate()
        .iter()
        .map(|s| s * args.amplitude)
        .collect();
    write_wav(&args.output, &samples, config.sample_rate)?;
    println!("Wrote {} samples to {}", samples.len(), args.output.display());

    if let Some(inverse_path) = args.inverse {
        let inverse = signal.inverse_filter();
        write_wav(&inverse_path, inverse, config.sample_rate)?;
        println!(
            "Wrote inverse filter ({} samples) to {}",
            inverse.len(),
            inverse_path.display()
        );
    }

    Ok(())
}
