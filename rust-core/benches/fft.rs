use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spectral_dsp::fft::{Fft, FftConfig, Matrix};
use spectral_dsp::spectrum::{pwelch_with, WelchConfig};
use spectral_dsp::Complex64;

fn generate_white_noise(size: usize) -> Vec<Complex64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size)
        .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

fn bench_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward");
    let fft = Fft::default();

    // Powers of two take the radix-2 path, the rest Bluestein
    for len in [1024, 1000, 65536, 65537, 1 << 20] {
        let input = generate_white_noise(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| black_box(fft.forward(black_box(input))))
        });
    }

    group.finish();
}

fn bench_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("radix2_workers");
    let len = 1 << 18;
    let input = generate_white_noise(len);
    group.throughput(Throughput::Elements(len as u64));

    for workers in [1, 2, 4, 8] {
        let fft = Fft::new(FftConfig::default().with_workers(workers)).unwrap();
        group.bench_with_input(BenchmarkId::new("workers", workers), &input, |b, input| {
            b.iter(|| black_box(fft.forward(black_box(input))))
        });
    }

    group.finish();
}

fn bench_two_dimensional(c: &mut Criterion) {
    let mut group = c.benchmark_group("fftn");
    let fft = Fft::default();

    for side in [64, 100, 256] {
        let matrix = Matrix::new(&[side, side], generate_white_noise(side * side)).unwrap();
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::new("square", side), &matrix, |b, matrix| {
            b.iter(|| black_box(fft.forward_n(black_box(matrix)).unwrap()))
        });
    }

    group.finish();
}

fn bench_pwelch(c: &mut Criterion) {
    let fft = Fft::default();
    let signal: Vec<f64> = generate_white_noise(1 << 16).iter().map(|v| v.re).collect();
    let config = WelchConfig::default().with_segment_len(1024).with_overlap(512);

    c.bench_function("pwelch_64k", |b| {
        b.iter(|| black_box(pwelch_with(&fft, black_box(&signal), 48000.0, &config).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_forward,
    bench_workers,
    bench_two_dimensional,
    bench_pwelch
);
criterion_main!(benches);
