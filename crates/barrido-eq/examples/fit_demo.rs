//! Fit demo: build a synthetic two-bell response and recover the filters.
//!
//! Run with: cargo run -p barrido-eq --example fit_demo

use barrido_dsp::log_bins;
use barrido_eq::{FilterParameter, FitOptions, fit_filters, frequency_response};

fn main() {
    // --- Synthesize a measured response from a known filter bank ---
    println!("=== Synthetic Response (two bells) ===\n");

    let truth = vec![
        FilterParameter { frequency: 120.0, gain_db: 6.0, q: 1.2 },
        FilterParameter { frequency: 2500.0, gain_db: 4.5, q: 2.0 },
    ];

    for filter in &truth {
        println!(
            "  {:>8.1} Hz  {:>+5.1} dB  Q {:.2}",
            filter.frequency, filter.gain_db, filter.q
        );
    }

    let frequencies = log_bins(256, 20.0, 20000.0);
    let magnitudes = frequency_response(&truth, &frequencies);

    // --- Fit ---
    println!("\n=== Fitted Filters ===\n");

    let fit = fit_filters(&frequencies, &magnitudes, &FitOptions::default());

    println!(
        "{:>10} {:>10} {:>8} {:>8} {:>8} {:>8}",
        "True (Hz)", "Fit (Hz)", "True dB", "Fit dB", "True Q", "Fit Q"
    );
    println!(
        "{:->10} {:->10} {:->8} {:->8} {:->8} {:->8}",
        "", "", "", "", "", ""
    );
    for (expected, fitted) in truth.iter().zip(fit.filters.iter()) {
        println!(
            "{:>10.1} {:>10.1} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            expected.frequency,
            fitted.frequency,
            expected.gain_db,
            fitted.gain_db,
            expected.q,
            fitted.q
        );
    }

    println!(
        "\nResidual {:.6} -> {:.6} in {} evaluations (converged: {})",
        fit.initial_cost, fit.final_cost, fit.evaluations, fit.converged
    );

    println!("\nFit demo complete.");
}
