//! Impulse response measurement command.

use std::path::PathBuf;

use barrido_io::{read_wav, write_wav};
use clap::Args;

use super::common::{SweepOpts, spinner};

#[derive(Args)]
pub struct MeasureArgs {
    /// Recorded sweep response WAV file
    #[arg(value_name = "RESPONSE")]
    response: PathBuf,

    /// Output impulse response WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Keep the full deconvolution output instead of trimming to the
    /// causal part
    #[arg(long)]
    raw: bool,

    #[command(flatten)]
    sweep: SweepOpts,
}

pub fn run(args: MeasureArgs) -> anyhow::Result<()> {
    let (config, signal) = args.sweep.sweep()?;

    println!("Reading {}...", args.response.display());
    let (response, response_rate) = read_wav(&args.response)?;

    if response_rate != config.sample_rate {
        anyhow::bail!(
            "Sample rate mismatch: response is {} Hz, sweep is {} Hz",
            response_rate,
            config.sample_rate
        );
    }

    let sweep_len = signal.generate().len();
    if response.len() < sweep_len {
        anyhow::bail!(
            "Response is shorter than the sweep: {} < {} samples",
            response.len(),
            sweep_len
        );
    }

    println!(
        "  {} samples ({:.3}s)",
        response.len(),
        response.len() as f64 / f64::from(response_rate)
    );

    let pb = spinner("Deconvolving sweep response");
    let ir = signal.compute_ir(&response);
    pb.finish_with_message("done");

    let samples = if args.raw {
        &ir[..]
    } else {
        // The direct sound of a zero-delay system lands one sample
        // before the sweep length; everything earlier is harmonic
        // distortion energy.
        let offset = sweep_len - 1;
        let tail = ((config.response_tail * f64::from(config.sample_rate)).ceil() as usize).max(1);
        let end = (offset + tail).min(ir.len());
        println!(
            "  Keeping {} samples from offset {} ({:.2}s tail)",
            end - offset,
            offset,
            config.response_tail
        );
        &ir[offset..end]
    };

    write_wav(&args.output, samples, config.sample_rate)?;
    println!(
        "Wrote {} samples to {}",
        samples.len(),
        args.output.display()
    );

    Ok(())
}
