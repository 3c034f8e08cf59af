//! Benchmarks for route evaluation and generation steps.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use grid_route_ga::{
    compute::{
        evolution::{CostWeights, EvolutionEngine, RouteEvaluator, random_walk_route},
        generate_surface,
    },
    schema::{CategoryCosts, Cell, RouteSearchConfig, SurfaceCategory},
};

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let config = RouteSearchConfig::default();

    for length in [10, 70, 250] {
        let mut rng = StdRng::seed_from_u64(42);
        let surface = generate_surface(
            64,
            64,
            &SurfaceCategory::ALL,
            CategoryCosts::default(),
            &mut rng,
        )
        .unwrap();
        let goal = Cell::new(63, 63);
        let evaluator =
            RouteEvaluator::new(Arc::new(surface), goal, CostWeights::from(&config));
        let route = random_walk_route(Cell::new(0, 0), goal, 64, 64, length, &mut rng);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_cells", route.len())),
            &length,
            |b, _| {
                b.iter(|| evaluator.evaluate(black_box(&route)));
            },
        );
    }

    group.finish();
}

fn bench_generation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_step");
    group.sample_size(20);

    for size in [100, 500, 1500] {
        let config = RouteSearchConfig {
            population_size: size,
            max_generations: usize::MAX,
            random_seed: Some(42),
            ..Default::default()
        };
        let mut engine = EvolutionEngine::new(config).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_routes", size)),
            &size,
            |b, _| {
                b.iter(|| engine.step());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_generation_step);
criterion_main!(benches);
