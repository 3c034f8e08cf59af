//! Compute module - Cost surface and evolutionary route search.

mod surface;

pub mod evolution;

pub use surface::*;
