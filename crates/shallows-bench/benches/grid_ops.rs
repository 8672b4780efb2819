//! Criterion micro-benchmarks for grid operators and the integrator.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use shallows_core::Staggering;
use shallows_grid::ArakawaCGrid;
use shallows_integrate::AdamsBashforth3;

fn grid() -> ArakawaCGrid {
    ArakawaCGrid::new(256, 255, 1.0e7, 1.0e7).unwrap()
}

fn smooth(shape: (usize, usize)) -> Array2<f64> {
    Array2::from_shape_fn(shape, |(i, j)| (i as f64 * 0.05).sin() * (j as f64 * 0.07).cos())
}

fn bench_laplacian(c: &mut Criterion) {
    let g = grid();
    let phi = smooth(g.padded_shape(Staggering::Phi));
    c.bench_function("laplacian_256", |b| {
        b.iter(|| black_box(g.laplacian(phi.view())));
    });
}

fn bench_divergence(c: &mut Criterion) {
    let g = grid();
    let u = smooth(g.interior_shape(Staggering::U));
    let v = smooth(g.interior_shape(Staggering::V));
    c.bench_function("divergence_256", |b| {
        b.iter(|| black_box(g.divergence(u.view(), v.view())));
    });
}

fn bench_uv_at_uv(c: &mut Criterion) {
    let g = grid();
    let u = smooth(g.padded_shape(Staggering::U));
    let v = smooth(g.padded_shape(Staggering::V));
    c.bench_function("uv_at_uv_256", |b| {
        b.iter(|| black_box(g.uv_at_uv(u.view(), v.view())));
    });
}

fn bench_ab3_advance(c: &mut Criterion) {
    let g = grid();
    let rate = smooth(g.interior_shape(Staggering::Phi));
    let mut ab = AdamsBashforth3::new(1000.0);
    for _ in 0..3 {
        ab.advance(rate.clone());
    }
    c.bench_function("ab3_advance_256", |b| {
        b.iter(|| black_box(ab.advance(rate.clone())));
    });
}

criterion_group!(
    benches,
    bench_laplacian,
    bench_divergence,
    bench_uv_at_uv,
    bench_ab3_advance
);
criterion_main!(benches);
