use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridseeker::engine::InferenceEngine;
use gridseeker::grid::Cell;
use gridseeker::world::GridWorld;

/// Formula construction dominated by the implication skeleton (O(N^4))
fn formula_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("formula_construction");
    for dim in &[4u32, 8, 12] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), dim, |b, &dim| {
            b.iter(|| InferenceEngine::new(black_box(dim), Cell::new(1, 1)).unwrap());
        });
    }
    group.finish();
}

/// Three full rounds against a simulated world, N^2 oracle queries each
fn full_rounds(c: &mut Criterion) {
    c.bench_function("three_rounds_dim_8", |b| {
        b.iter(|| {
            let world = GridWorld::new(8, Cell::new(6, 6), &[]).unwrap();
            let mut engine = InferenceEngine::new(8, Cell::new(1, 1)).unwrap();
            for step in [Cell::new(2, 2), Cell::new(4, 4), Cell::new(6, 6)] {
                let outcome = world.accept_move(step).unwrap();
                let observation = world.observe(&outcome);
                engine.run_round(&outcome, &observation).unwrap();
            }
            black_box(engine.knowledge())
        });
    });
}

criterion_group!(benches, formula_construction, full_rounds);
criterion_main!(benches);
