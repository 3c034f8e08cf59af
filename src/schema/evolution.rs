//! Progress and result types for route evolution.
//!
//! These are the read-only views handed to rendering and control
//! collaborators: they are owned copies, never live references into the
//! engine's population.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Route;

/// Per-term breakdown of a route's cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CostBreakdown {
    /// Unweighted sum of per-cell surface costs (out-of-bounds penalties included).
    pub surface: f64,
    /// Sum of non-adjacent step penalties.
    pub adjacency: f64,
    /// Route length times the per-cell penalty.
    pub length: f64,
    /// Manhattan distance from the route end to the goal, scaled.
    pub distance: f64,
    /// Weighted total; lower is better.
    pub total: f64,
}

/// Outcome of one completed generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation counter after the step.
    pub generation: usize,
    /// Best-ever cost after the step.
    pub best_cost: f64,
    /// Length of the best-ever route.
    pub best_route_length: usize,
}

/// Current phase of evolution.
///
/// The initial population is built inside the engine constructor, so an
/// engine is observed either evolving or terminated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EvolutionPhase {
    /// Generations remain in the budget.
    Evolving,
    /// Generation budget exhausted.
    Terminated,
}

/// Progress update for real-time visualization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Current generation number.
    pub generation: usize,
    /// Total generations planned.
    pub total_generations: usize,
    /// Best cost seen so far.
    pub best_cost: f64,
    /// Lowest cost in the current population.
    pub generation_best: f64,
    /// Mean cost of the current population.
    pub avg_cost: f64,
    /// Best-ever route, if a generation has completed.
    pub best_route: Option<Route>,
    /// Statistics history for plotting.
    pub history: EvolutionHistory,
    /// Current phase of the algorithm.
    pub phase: EvolutionPhase,
}

/// Evolution history for plotting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    /// Best cost per generation.
    pub best_cost: Vec<f64>,
    /// Average cost per generation.
    pub avg_cost: Vec<f64>,
    /// Standard deviation per generation.
    pub cost_std: Vec<f64>,
    /// Fraction of routes that are in bounds and fully adjacent.
    pub well_formed_fraction: Vec<f64>,
    /// Fraction of routes ending on the goal.
    pub goal_reached_fraction: Vec<f64>,
}

/// Final result of an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best route found.
    pub best_route: Route,
    /// Cost terms of the best route.
    pub best_breakdown: CostBreakdown,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}

impl EvolutionResult {
    /// Write the result as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}

/// Statistics from an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Total generations run.
    pub generations: usize,
    /// Total cost evaluations performed.
    pub total_evaluations: u64,
    /// Best cost achieved.
    pub best_cost: f64,
    /// Average cost of final population.
    pub final_avg_cost: f64,
    /// Whether the best route ends on the goal.
    pub goal_reached: bool,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Evaluations per second.
    pub evaluations_per_second: f64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Reason evolution stopped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Reached maximum generations.
    MaxGenerations,
    /// Stopped through the cancellation handle.
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Cell;

    #[test]
    fn test_result_write_json() {
        let result = EvolutionResult {
            best_route: Route::new(vec![Cell::new(0, 0), Cell::new(0, 1)]).unwrap(),
            best_breakdown: CostBreakdown {
                surface: 3.0,
                length: 0.02,
                total: 30.02,
                ..Default::default()
            },
            stats: EvolutionStats {
                generations: 1,
                total_evaluations: 4,
                best_cost: 30.02,
                final_avg_cost: 31.0,
                goal_reached: true,
                elapsed_seconds: 0.1,
                evaluations_per_second: 40.0,
                stop_reason: StopReason::MaxGenerations,
            },
            history: EvolutionHistory::default(),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        result.write_json(&path).unwrap();

        let parsed: EvolutionResult =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.best_route, result.best_route);
        assert_eq!(parsed.stats.stop_reason, StopReason::MaxGenerations);
    }
}
