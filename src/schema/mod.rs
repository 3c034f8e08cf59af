//! Schema module - Configuration, grid, route and reporting types for route search.

mod config;
mod evolution;
mod grid;
mod route;

pub use config::*;
pub use evolution::*;
pub use grid::*;
pub use route::*;
