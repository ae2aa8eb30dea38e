//! Concrete integration and diagram benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use calc_core::calculations::concrete_integration::{concrete_forces, integrate_layered};
use calc_core::calculations::design_point::{self, DesignInput};
use calc_core::calculations::diagram::{self, DiagramInput};
use calc_core::materials::ConcreteLaw;
use calc_core::strain::StrainState;

fn bench_closed_form(c: &mut Criterion) {
    let concrete = ConcreteLaw::default();
    let (k, q) = StrainState::new(-0.0035, 0.005).params(0.5);

    c.bench_function("concrete_closed_form", |b| {
        b.iter(|| concrete_forces(black_box(0.3), black_box(0.5), black_box(k), black_box(q), &concrete))
    });
}

fn bench_layered(c: &mut Criterion) {
    let concrete = ConcreteLaw::default();
    let (k, q) = StrainState::new(-0.0035, 0.005).params(0.5);

    c.bench_function("concrete_layered_100", |b| {
        b.iter(|| integrate_layered(black_box(0.3), black_box(0.5), black_box(k), black_box(q), &concrete, 100))
    });
}

fn bench_diagram(c: &mut Criterion) {
    let input = DiagramInput::default();

    c.bench_function("interaction_diagram", |b| {
        b.iter(|| diagram::calculate(black_box(&input)))
    });
}

fn bench_design_point(c: &mut Criterion) {
    let input = DesignInput::default();

    c.bench_function("design_point", |b| {
        b.iter(|| design_point::calculate(black_box(&input)))
    });
}

criterion_group!(
    benches,
    bench_closed_form,
    bench_layered,
    bench_diagram,
    bench_design_point
);
criterion_main!(benches);
