//! Evolutionary search module for low-cost grid routes.
//!
//! # Overview
//!
//! The evolutionary search system consists of:
//!
//! - **Fitness** (`fitness`): Route cost function with per-term breakdown
//! - **Operators** (`operators`): Random walks, roulette selection, crossover and mutation
//! - **Population** (`population`): Ranking, elitism and generational replacement
//! - **Search** (`search`): The generational driver and its query surface
//!
//! # Example
//!
//! ```rust,no_run
//! use grid_route_ga::compute::evolution::EvolutionEngine;
//! use grid_route_ga::schema::RouteSearchConfig;
//!
//! let config = RouteSearchConfig {
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config).expect("valid config");
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best cost = {:.2}",
//!         progress.generation, progress.best_cost);
//! });
//!
//! println!("Best route has {} cells", result.best_route.len());
//! ```

mod fitness;
mod operators;
mod population;
mod search;

pub use fitness::{CostWeights, RouteEvaluator};
pub use operators::{
    RouletteWheel, RouteOperators, SELECTION_EPSILON, random_walk_route, roulette_select,
};
pub use population::{Individual, Population, PopulationStats};
pub use search::EvolutionEngine;
