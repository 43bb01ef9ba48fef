//! Criterion benchmarks for filter fitting
//!
//! Run with: cargo bench -p barrido-eq

use barrido_dsp::log_bins;
use barrido_eq::{
    FilterParameter, FitOptions, PeakOptions, find_peaks, fit_filters, frequency_response,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn two_bell_curve(num_bins: usize) -> (Vec<f64>, Vec<f64>) {
    let truth = [
        FilterParameter { frequency: 150.0, gain_db: 6.0, q: 1.2 },
        FilterParameter { frequency: 2500.0, gain_db: 4.0, q: 1.5 },
    ];
    let grid = log_bins(num_bins, 20.0, 20000.0);
    let measured = frequency_response(&truth, &grid);
    (grid, measured)
}

fn bench_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequency_response");
    let bank: Vec<FilterParameter> = (0..4)
        .map(|i| FilterParameter {
            frequency: 100.0 * f64::from(1 << i),
            gain_db: 3.0,
            q: 1.5,
        })
        .collect();
    for num_bins in [128, 512, 2048] {
        let grid = log_bins(num_bins, 20.0, 20000.0);
        group.bench_with_input(BenchmarkId::from_parameter(num_bins), &grid, |b, grid| {
            b.iter(|| frequency_response(black_box(&bank), grid));
        });
    }
    group.finish();
}

fn bench_peak_pick(c: &mut Criterion) {
    let (_, measured) = two_bell_curve(2048);
    let options = PeakOptions {
        min_height: 10f64.powf(0.5 / 20.0),
        min_distance: 64,
    };
    c.bench_function("find_peaks_2048", |b| {
        b.iter(|| find_peaks(black_box(&measured), &options));
    });
}

fn bench_full_fit(c: &mut Criterion) {
    let (grid, measured) = two_bell_curve(256);
    c.bench_function("fit_two_bells_256", |b| {
        b.iter(|| fit_filters(black_box(&grid), black_box(&measured), &FitOptions::default()));
    });
}

criterion_group!(benches, bench_response, bench_peak_pick, bench_full_fit);
criterion_main!(benches);
