//! Criterion benchmarks for full propagations through the test tracker.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gyre_bench::{reference_rk_propagator, reference_sl_propagator};
use gyre_core::{units, Direction};
use gyre_propagator::{MaterialInteractor, PropagatorOptions};
use gyre_test_utils::charged_track;

use std::f64::consts::FRAC_PI_2;

fn options() -> PropagatorOptions {
    let mut options = PropagatorOptions::default();
    options.direction = Direction::Forward;
    options.path_limit = 25.0 * units::CM;
    options
}

/// Benchmark: 1 GeV track, 25 cm budget, adaptive Runge-Kutta stepping.
fn bench_rk_propagation(c: &mut Criterion) {
    let prop = reference_rk_propagator();
    c.bench_function("rk_propagation_25cm", |b| {
        b.iter(|| {
            let result = prop
                .propagate(charged_track(1.0, 0.0, FRAC_PI_2, 1.0), options())
                .unwrap();
            black_box(result.path_length);
        });
    });
}

/// Benchmark: the same track with the straight-line oracle.
fn bench_sl_propagation(c: &mut Criterion) {
    let prop = reference_sl_propagator();
    c.bench_function("sl_propagation_25cm", |b| {
        b.iter(|| {
            let result = prop
                .propagate(charged_track(1.0, 0.0, FRAC_PI_2, 0.0), options())
                .unwrap();
            black_box(result.path_length);
        });
    });
}

/// Benchmark: propagation with material collection enabled.
fn bench_rk_with_material(c: &mut Criterion) {
    let prop = reference_rk_propagator();
    c.bench_function("rk_propagation_with_material", |b| {
        b.iter(|| {
            let mut opts = options();
            opts.actions.push(Box::new(MaterialInteractor {
                multiple_scattering: false,
                energy_loss: false,
                record_interactions: true,
            }));
            let result = prop
                .propagate(charged_track(1.0, 0.0, FRAC_PI_2, 1.0), opts)
                .unwrap();
            black_box(result.path_length);
        });
    });
}

criterion_group!(
    benches,
    bench_rk_propagation,
    bench_sl_propagation,
    bench_rk_with_material
);
criterion_main!(benches);
