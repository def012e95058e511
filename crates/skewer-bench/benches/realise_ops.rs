//! Criterion micro-benchmarks for Gaussian field realisation.

use criterion::{criterion_group, criterion_main, Criterion};
use skewer_bench::{reference_field, reference_grid, reference_model};
use skewer_core::fft::{fftn, ifftn};
use skewer_realise::{make_hermitian, GaussianFieldGenerator};
use std::hint::black_box;

fn bench_realise(c: &mut Criterion) {
    let grid = reference_grid();
    let model = reference_model();
    let generator = GaussianFieldGenerator::builder().seed(7).build();
    let mut realisation = 0u64;
    c.bench_function("realise_32cubed", |b| {
        b.iter(|| {
            realisation += 1;
            black_box(generator.realise(&model, &grid, realisation).unwrap());
        });
    });
}

fn bench_hermitian(c: &mut Criterion) {
    let amplitudes = fftn(&reference_field(1));
    c.bench_function("make_hermitian_32cubed", |b| {
        b.iter(|| black_box(make_hermitian(black_box(&amplitudes))));
    });
}

fn bench_fft(c: &mut Criterion) {
    let field = reference_field(2);
    c.bench_function("fftn_32cubed", |b| {
        b.iter(|| black_box(fftn(black_box(&field))));
    });
    c.bench_function("ifftn_32cubed", |b| {
        b.iter(|| black_box(ifftn(black_box(&field))));
    });
}

criterion_group!(benches, bench_realise, bench_hermitian, bench_fft);
criterion_main!(benches);
