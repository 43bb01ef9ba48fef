//! Barrido CLI - command-line interface for sweep-based impulse response
//! measurement.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "barrido")]
#[command(author, version, about = "Log-sweep impulse response measurement toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sweep excitation and optionally its inverse filter
    Generate(commands::generate::GenerateArgs),

    /// Convolve the sweep with a known impulse response to synthesize a
    /// recorded response
    Simulate(commands::simulate::SimulateArgs),

    /// Deconvolve a recorded sweep response into an impulse response
    Measure(commands::measure::MeasureArgs),

    /// Export magnitude and phase spectra of an impulse response
    Analyze(commands::analyze::AnalyzeArgs),

    /// Fit parametric bell filters to a measured response
    Fit(commands::fit::FitArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Measure(args) => commands::measure::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Fit(args) => commands::fit::run(args),
    }
}
