//! Grid Route GA CLI - Run a route search from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use grid_route_ga::{
    compute::{CostSurface, evolution::EvolutionEngine},
    schema::{Cell, Route, RouteSearchConfig},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [result.json]", args[0]);
        eprintln!();
        eprintln!("Evolve a low-cost route across a random weighted grid.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to search configuration file");
        eprintln!("  result.json  Optional path to write the run result");
        eprintln!();
        eprintln!("Example configuration is printed with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let output_path = args.get(2).map(PathBuf::from);

    let config = RouteSearchConfig::from_json_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    println!("Grid Route GA");
    println!("=============");
    println!(
        "Grid: {}x{}  start {}  goal {}",
        config.grid_rows, config.grid_cols, config.start_cell, config.goal_cell
    );
    println!(
        "Population: {}  generations: {}  max route length: {}",
        config.population_size, config.max_generations, config.max_path_length
    );
    println!(
        "Mutation: {}  crossover: {}  elites: {}",
        config.mutation_rate,
        config.crossover_rate,
        config.elite_count()
    );
    println!();

    let mut engine = EvolutionEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Error creating engine: {}", e);
        std::process::exit(1);
    });

    println!("Running evolution...");
    let start = Instant::now();
    let total = engine.config().max_generations;

    let result = engine.run_with_callback(|progress| {
        // Print progress every 10%
        if progress.generation > 0 && progress.generation % (total / 10).max(1) == 0 {
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Gen {}/{}: best cost {:.2} | path length {} | avg {:.2}, {:.1} gen/s",
                progress.generation,
                total,
                progress.best_cost,
                progress.best_route.as_ref().map_or(0, Route::len),
                progress.avg_cost,
                progress.generation as f32 / elapsed
            );
        }
    });

    println!();
    println!("{}", render_map(engine.surface(), &result.best_route, engine.config()));
    println!();
    println!("Best route:");
    println!("  Cost: {:.2}", result.stats.best_cost);
    println!(
        "  Terms: surface {:.2} | adjacency {:.2} | length {:.2} | distance {:.2}",
        result.best_breakdown.surface,
        result.best_breakdown.adjacency,
        result.best_breakdown.length,
        result.best_breakdown.distance
    );
    println!("  Length: {} cells", result.best_route.len());
    println!("  Reaches goal: {}", result.stats.goal_reached);
    println!(
        "Time: {:.2}s ({:.0} evaluations/s, stopped: {:?})",
        result.stats.elapsed_seconds, result.stats.evaluations_per_second, result.stats.stop_reason
    );

    if let Some(path) = output_path {
        if let Err(e) = result.write_json(&path) {
            eprintln!("Error writing result: {}", e);
            std::process::exit(1);
        }
        println!("Result written to {}", path.display());
    }
}

/// Text map of the surface with the route overlaid.
///
/// `S` start, `G` goal, `*` route cell, otherwise the category symbol.
fn render_map(surface: &CostSurface, route: &Route, config: &RouteSearchConfig) -> String {
    let on_route: HashSet<Cell> = route.cells().iter().copied().collect();
    let mut out = String::new();

    for (row, categories) in surface.rows_iter().enumerate() {
        for (col, category) in categories.iter().enumerate() {
            let cell = Cell::new(row as i32, col as i32);
            let symbol = if cell == config.start_cell {
                'S'
            } else if cell == config.goal_cell {
                'G'
            } else if on_route.contains(&cell) {
                '*'
            } else {
                category.symbol()
            };
            out.push(symbol);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn print_example_config() {
    let config = RouteSearchConfig::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
