//! Measurement simulation command.
//!
//! Convolves the sweep with a known impulse response to produce the
//! signal a microphone would have captured, useful for testing the
//! measurement chain without a room.

use std::path::PathBuf;

use barrido_dsp::convolve;
use barrido_io::{read_wav, write_wav};
use clap::Args;

use super::common::{SweepOpts, spinner};

#[derive(Args)]
pub struct SimulateArgs {
    /// Impulse response WAV file describing the system
    #[arg(value_name = "IR")]
    ir: PathBuf,

    /// Output WAV file for the simulated response
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    sweep: SweepOpts,
}

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let (config, signal) = args.sweep.sweep()?;

    println!("Reading {}...", args.ir.display());
    let (ir, ir_rate) = read_wav(&args.ir)?;

    if ir_rate != config.sample_rate {
        anyhow::bail!(
            "Sample rate mismatch: IR is {} Hz, sweep is {} Hz",
            ir_rate,
            config.sample_rate
        );
    }
    if ir.is_empty() {
        anyhow::bail!("Impulse response {} has no samples", args.ir.display());
    }

    println!(
        "  {} samples ({:.3}s)",
        ir.len(),
        ir.len() as f64 / f64::from(ir_rate)
    );

    let pb = spinner("Convolving sweep with impulse response");
    let response = convolve(signal.generate(), &ir);
    pb.finish_with_message("done");

    write_wav(&args.output, &response, config.sample_rate)?;
    println!(
        "Wrote {} samples to {}",
        response.len(),
        args.output.display()
    );

    Ok(())
}
