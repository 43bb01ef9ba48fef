//! Criterion benchmarks for the sweep measurement core
//!
//! Run with: cargo bench -p barrido-dsp

use barrido_dsp::{SweepSignal, SweepSpec, convolve, dft, log_bins, log_magnitude};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SAMPLE_RATE: f64 = 48000.0;

/// Deterministic noise burst for convolution inputs.
fn noise(size: usize) -> Vec<f64> {
    let mut state = 0x12345678u32;
    (0..size)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            f64::from(state) / f64::from(u32::MAX) * 2.0 - 1.0
        })
        .collect()
}

fn bench_dft(c: &mut Criterion) {
    let mut group = c.benchmark_group("dft");
    for size in [256, 1024, 4096, 16384] {
        let signal = noise(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &signal, |b, signal| {
            b.iter(|| dft(black_box(signal)));
        });
    }
    group.finish();
}

fn bench_convolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolve");
    for size in [1024, 8192, 32768] {
        let a = noise(size);
        let b_signal = noise(500);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| convolve(black_box(&a), black_box(&b_signal)));
        });
    }
    group.finish();
}

fn bench_sweep_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_synthesis");
    for duration in [0.5, 1.0, 2.0] {
        let spec = SweepSpec::new(SAMPLE_RATE, duration, 10.0, 22000.0).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(duration),
            &spec,
            |b, &spec| {
                b.iter(|| {
                    let sweep = SweepSignal::logarithmic(spec);
                    black_box(sweep.inverse_filter().len())
                });
            },
        );
    }
    group.finish();
}

fn bench_deconvolution(c: &mut Criterion) {
    let spec = SweepSpec::new(SAMPLE_RATE, 1.0, 10.0, 22000.0).unwrap();
    let sweep = SweepSignal::logarithmic(spec);
    let response = convolve(sweep.generate(), &noise(500));
    sweep.inverse_filter();

    c.bench_function("compute_ir_1s", |b| {
        b.iter(|| sweep.compute_ir(black_box(&response)));
    });
}

fn bench_log_spectrum(c: &mut Criterion) {
    let ir = noise(4096);
    c.bench_function("log_magnitude_4096_to_1024", |b| {
        b.iter(|| log_magnitude(black_box(&ir), SAMPLE_RATE, 1024, 20.0, 20000.0));
    });

    c.bench_function("log_bins_1024", |b| {
        b.iter(|| log_bins(black_box(1024), 20.0, 20000.0));
    });
}

criterion_group!(
    benches,
    bench_dft,
    bench_convolve,
    bench_sweep_synthesis,
    bench_deconvolution,
    bench_log_spectrum
);
criterion_main!(benches);
