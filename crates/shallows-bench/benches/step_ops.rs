//! Criterion benchmarks for whole model steps.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;
use shallows_bench::{hump_model, linear_profile, reference_profile, stress_profile};
use shallows_engine::TracerSpec;
use shallows_test_utils::fixtures::{linear_drag, relax_to_height};

fn bench_step_nonlinear(c: &mut Criterion) {
    let mut model = hump_model(reference_profile(), 1.0).unwrap();

    // Warm up past the Euler and AB2 bootstrap steps.
    model.step_n(3).unwrap();

    c.bench_function("step_nonlinear_128", |b| {
        b.iter(|| {
            model.step().unwrap();
            black_box(model.phi()[[64, 64]]);
        });
    });
}

fn bench_step_linear(c: &mut Criterion) {
    let mut model = hump_model(linear_profile(), 1.0).unwrap();
    model.step_n(3).unwrap();

    c.bench_function("step_linear_walled_128", |b| {
        b.iter(|| {
            model.step().unwrap();
            black_box(model.phi()[[64, 64]]);
        });
    });
}

fn bench_step_with_tracers(c: &mut Criterion) {
    let mut model = hump_model(reference_profile(), 1.0).unwrap();
    let (nx, ny) = (model.config().nx, model.config().ny);
    model
        .register_tracer(
            TracerSpec::new("dye", Array2::from_elem((nx, ny), 1.0))
                .source_fn(relax_to_height(10.0, 1.0e-6)),
        )
        .unwrap();
    model
        .register_tracer(TracerSpec::new("salt", Array2::zeros((nx, ny))).diffusivity(1.0e3))
        .unwrap();
    model.register_forcing(linear_drag(1.0e-7)).unwrap();
    model.step_n(3).unwrap();

    c.bench_function("step_nonlinear_128_two_tracers", |b| {
        b.iter(|| {
            model.step().unwrap();
            black_box(model.read_tracer("dye"));
        });
    });
}

fn bench_step_stress(c: &mut Criterion) {
    let mut model = hump_model(stress_profile(), 1.0).unwrap();
    model.step_n(3).unwrap();

    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("step_nonlinear_512", |b| {
        b.iter(|| {
            model.step().unwrap();
            black_box(model.phi()[[256, 255]]);
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_step_nonlinear,
    bench_step_linear,
    bench_step_with_tracers,
    bench_step_stress
);
criterion_main!(benches);
