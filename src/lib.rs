//! Grid Route GA - Genetic algorithm search for low-cost grid routes.
//!
//! This crate evolves a population of candidate routes across a grid whose
//! cells carry heterogeneous traversal costs. It is an optimization
//! demonstrator, not an exact pathfinder: routes are scored, recombined and
//! mutated until a generation budget runs out, and the cheapest route seen
//! along the way is kept.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, grid, route and reporting types
//! - `compute`: Cost surface and the evolutionary search engine
//!
//! # Example
//!
//! ```rust,no_run
//! use grid_route_ga::{EvolutionEngine, RouteSearchConfig};
//!
//! let config = RouteSearchConfig::default();
//! let mut engine = EvolutionEngine::new(config).expect("valid config");
//!
//! while let Some(report) = engine.step() {
//!     println!("gen {} best {:.2}", report.generation, report.best_cost);
//! }
//!
//! println!("Best route: {:?}", engine.best_ever_route());
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{EvolutionEngine, Individual, RouteEvaluator};
pub use compute::{CostSurface, generate_surface};
pub use schema::{Cell, Route, RouteSearchConfig, SurfaceCategory};
