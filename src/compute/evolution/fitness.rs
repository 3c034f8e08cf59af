//! Route cost function.
//!
//! A route's cost combines four terms: the weighted surface cost of its
//! cells, a penalty for every non-adjacent step, a small per-cell length
//! cost and the remaining Manhattan distance to the goal. Broken routes are
//! never rejected, only priced far above well-formed ones.

use std::sync::Arc;

use crate::compute::CostSurface;
use crate::schema::{Cell, CostBreakdown, Route, RouteSearchConfig};

/// Scalar weights of the cost function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    pub surface_weight: f64,
    pub distance_factor: f64,
    pub length_penalty: f64,
    pub adjacency_penalty: f64,
    pub out_of_bounds_penalty: f64,
}

impl From<&RouteSearchConfig> for CostWeights {
    fn from(config: &RouteSearchConfig) -> Self {
        Self {
            surface_weight: config.surface_weight,
            distance_factor: config.distance_factor,
            length_penalty: config.length_penalty,
            adjacency_penalty: config.adjacency_penalty,
            out_of_bounds_penalty: config.out_of_bounds_penalty,
        }
    }
}

/// Evaluates routes against a shared, immutable cost surface.
#[derive(Debug, Clone)]
pub struct RouteEvaluator {
    surface: Arc<CostSurface>,
    goal: Cell,
    weights: CostWeights,
}

impl RouteEvaluator {
    /// Create a new route evaluator.
    pub fn new(surface: Arc<CostSurface>, goal: Cell, weights: CostWeights) -> Self {
        Self {
            surface,
            goal,
            weights,
        }
    }

    #[inline]
    pub fn surface(&self) -> &CostSurface {
        &self.surface
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[inline]
    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    /// Total cost of a route. Lower is better.
    #[inline]
    pub fn evaluate(&self, route: &Route) -> f64 {
        self.breakdown(route).total
    }

    /// Cost of a route split into its terms.
    pub fn breakdown(&self, route: &Route) -> CostBreakdown {
        let w = &self.weights;

        let surface: f64 = route
            .cells()
            .iter()
            .map(|&cell| {
                self.surface
                    .cost_at(cell)
                    .unwrap_or(w.out_of_bounds_penalty)
            })
            .sum();

        let adjacency = route.broken_steps() as f64 * w.adjacency_penalty;
        let length = route.len() as f64 * w.length_penalty;

        let last = route.last();
        let distance = if last == self.goal {
            0.0
        } else {
            last.manhattan(self.goal) as f64 * w.distance_factor
        };

        CostBreakdown {
            surface,
            adjacency,
            length,
            distance,
            total: w.surface_weight * surface + length + distance + adjacency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CategoryCosts, SurfaceCategory};

    fn weights() -> CostWeights {
        CostWeights::from(&RouteSearchConfig::default())
    }

    fn evaluator(goal: Cell) -> RouteEvaluator {
        // 3x3: first row Smooth, Grassy, Sandy; the rest Rocky.
        let mut cells = vec![SurfaceCategory::Rocky; 9];
        cells[0] = SurfaceCategory::Smooth;
        cells[1] = SurfaceCategory::Grassy;
        cells[2] = SurfaceCategory::Sandy;
        let surface = CostSurface::from_categories(3, 3, cells, CategoryCosts::default()).unwrap();
        RouteEvaluator::new(Arc::new(surface), goal, weights())
    }

    fn route(cells: &[(i32, i32)]) -> Route {
        Route::new(cells.iter().copied().map(Cell::from).collect()).unwrap()
    }

    #[test]
    fn test_worked_example() {
        let eval = evaluator(Cell::new(0, 1));
        let b = eval.breakdown(&route(&[(0, 0), (0, 1)]));

        assert!((b.surface - 3.0).abs() < 1e-12);
        assert_eq!(b.adjacency, 0.0);
        assert!((b.length - 0.02).abs() < 1e-12);
        assert_eq!(b.distance, 0.0);
        assert!((b.total - 30.02).abs() < 1e-9);
    }

    #[test]
    fn test_single_cell_route_at_goal_has_no_distance_cost() {
        let eval = evaluator(Cell::new(0, 0));
        let b = eval.breakdown(&route(&[(0, 0)]));
        assert_eq!(b.distance, 0.0);
        assert!((b.total - (10.0 + 0.01)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_cost() {
        let eval = evaluator(Cell::new(2, 2));
        let b = eval.breakdown(&route(&[(0, 0), (0, 1)]));
        // Manhattan((0,1), (2,2)) = 3
        assert!((b.distance - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_adjacency_penalty_dominates() {
        let eval = evaluator(Cell::new(2, 2));
        let jump = eval.breakdown(&route(&[(0, 0), (2, 2)]));
        assert_eq!(jump.adjacency, 999_999.0);
        assert!(jump.total >= 999_999.0);

        let walk = eval.evaluate(&route(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]));
        assert!(walk < jump.total);
    }

    #[test]
    fn test_out_of_bounds_penalty() {
        let eval = evaluator(Cell::new(2, 2));
        let b = eval.breakdown(&route(&[(0, 0), (-1, 0)]));
        assert_eq!(b.surface, 1.0 + 999_999.0);
        assert_eq!(b.adjacency, 0.0);
    }

    #[test]
    fn test_extreme_coordinates_are_scored() {
        let eval = evaluator(Cell::new(2, 2));
        let b = eval.breakdown(&route(&[(i32::MIN, i32::MIN), (i32::MAX, i32::MAX)]));

        assert!(b.total.is_finite());
        assert_eq!(b.adjacency, 999_999.0);
        assert_eq!(b.surface, 2.0 * 999_999.0);
        assert!(b.total >= b.adjacency);
    }

    #[test]
    fn test_penalties_are_independent() {
        let surface = evaluator(Cell::new(2, 2)).surface().clone();
        let eval = RouteEvaluator::new(
            Arc::new(surface),
            Cell::new(2, 2),
            CostWeights {
                adjacency_penalty: 5.0,
                out_of_bounds_penalty: 7.0,
                ..weights()
            },
        );
        let b = eval.breakdown(&route(&[(0, 0), (5, 5)]));
        assert_eq!(b.adjacency, 5.0);
        assert_eq!(b.surface, 1.0 + 7.0);
    }

    #[test]
    fn test_cost_is_non_negative_and_deterministic() {
        let eval = evaluator(Cell::new(2, 2));
        let r = route(&[(0, 0), (0, 1), (1, 1), (1, 2)]);
        let c = eval.evaluate(&r);
        assert!(c >= 0.0);
        assert_eq!(c, eval.evaluate(&r));
    }
}
