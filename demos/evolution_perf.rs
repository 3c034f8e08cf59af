//! Quick evolution performance test

use grid_route_ga::{EvolutionEngine, RouteSearchConfig, schema::Cell};
use std::time::Instant;

fn main() {
    println!("=== Evolution Performance Test ===\n");

    // Test different grid sizes
    for grid_size in [10, 20, 40] {
        println!("Grid size: {}x{}", grid_size, grid_size);

        let last = grid_size as i32 - 1;
        let config = RouteSearchConfig {
            grid_rows: grid_size,
            grid_cols: grid_size,
            goal_cell: Cell::new(last, last),
            population_size: 300,
            max_generations: 50,
            max_path_length: grid_size * 4,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = EvolutionEngine::new(config).unwrap();
        let result = engine.run();
        let elapsed = start.elapsed();

        let total_evals = result.stats.total_evaluations;
        let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

        println!("  Generations:    {}", result.stats.generations);
        println!("  Evaluations:    {}", total_evals);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Evals/sec:      {:.1}", evals_per_sec);
        println!("  Best cost:      {:.2}", result.stats.best_cost);
        println!("  Reaches goal:   {}", result.stats.goal_reached);
        println!();
    }

    println!("=== Scalability Test (fixed 20x20 grid) ===\n");

    // Test different population sizes
    for pop_size in [100, 500, 1500] {
        let config = RouteSearchConfig {
            population_size: pop_size,
            max_generations: 20,
            random_seed: Some(42),
            ..Default::default()
        };

        let start = Instant::now();
        let mut engine = EvolutionEngine::new(config).unwrap();
        let result = engine.run();
        let elapsed = start.elapsed();

        let total_evals = result.stats.total_evaluations;
        let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

        println!(
            "Population {}: {} evals in {:.2}s ({:.1} evals/sec), best cost {:.2}",
            pop_size,
            total_evals,
            elapsed.as_secs_f64(),
            evals_per_sec,
            result.stats.best_cost
        );
    }
}
