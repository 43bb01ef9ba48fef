//! Measurement demo: synthesize a sweep, run it through a known system,
//! and recover the impulse response by deconvolution.
//!
//! Run with: cargo run -p barrido-dsp --example measurement_demo

use barrido_dsp::{SweepSignal, SweepSpec, convolve, log_magnitude};

fn main() {
    let sample_rate = 48000.0;

    // --- Synthesize the excitation ---
    println!("=== Logarithmic Sweep (20 Hz to 20 kHz, 1 s) ===\n");

    let spec = SweepSpec::new(sample_rate, 1.0, 20.0, 20000.0).unwrap();
    let signal = SweepSignal::logarithmic(spec);
    let sweep = signal.generate();
    let inverse = signal.inverse_filter();

    println!("Sweep length:   {} samples", sweep.len());
    println!("Inverse length: {} samples", inverse.len());
    println!(
        "Sweep peak:     {:.4}",
        sweep.iter().map(|s| s.abs()).fold(0.0f64, f64::max)
    );

    // --- Simulate a known system ---
    println!("\n=== Simulated System (direct sound + two echoes) ===\n");

    let taps: [(usize, f64); 3] = [(0, 1.0), (480, 0.5), (2400, -0.25)];
    let mut system = vec![0.0; 4800];
    for &(delay, amplitude) in &taps {
        system[delay] = amplitude;
    }

    for &(delay, amplitude) in &taps {
        println!(
            "  tap at {:>5} samples ({:>5.1} ms): {:+.2}",
            delay,
            delay as f64 / sample_rate * 1000.0,
            amplitude
        );
    }

    let recorded = convolve(sweep, &system);
    println!("\nRecorded response: {} samples", recorded.len());

    // --- Deconvolve ---
    println!("\n=== Recovered Impulse Response ===\n");

    let ir = signal.compute_ir(&recorded);
    let offset = sweep.len() - 1;

    println!("{:>8} {:>10} {:>10}", "Delay", "True", "Recovered");
    println!("{:->8} {:->10} {:->10}", "", "", "");
    for &(delay, amplitude) in &taps {
        println!(
            "{:>8} {:>10.4} {:>10.4}",
            delay,
            amplitude,
            ir[offset + delay]
        );
    }

    let worst = taps
        .iter()
        .map(|&(delay, amplitude)| (ir[offset + delay] - amplitude).abs())
        .fold(0.0f64, f64::max);
    println!("\nWorst tap error: {:.2e}", worst);

    // --- Spectrum of the recovered system ---
    println!("\n=== Recovered Magnitude Response (12 log bins) ===\n");

    let trimmed = &ir[offset..offset + system.len()];
    let spectrum = log_magnitude(trimmed, sample_rate, 12, 20.0, 20000.0);

    println!("{:>10} {:>10}", "Freq (Hz)", "Level (dB)");
    println!("{:->10} {:->10}", "", "");
    for (freq, db) in spectrum
        .frequencies
        .iter()
        .zip(spectrum.magnitudes_db.iter())
    {
        println!("{:>10.1} {:>10.2}", freq, db);
    }

    println!("\nMeasurement demo complete.");
}
