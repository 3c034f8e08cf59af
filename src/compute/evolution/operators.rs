//! Route manipulation utilities for evolutionary search.
//!
//! Provides random-walk generation, roulette selection, splice crossover and
//! point mutation. Every operator takes its random source explicitly so that
//! callers can supply a seeded or scripted generator.

use std::ops::ControlFlow;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::schema::{Cell, Route, RouteSearchConfig};

use super::population::Individual;

/// Added to every cost before inversion so a zero-cost route still has finite weight.
pub const SELECTION_EPSILON: f64 = 1e-6;

/// Build a route by walking from `start` to uniformly chosen in-bounds neighbours.
///
/// Stops on reaching `goal`, once the route holds `max_length` cells, or when
/// the current cell has no in-bounds neighbour.
pub fn random_walk_route<R: Rng + ?Sized>(
    start: Cell,
    goal: Cell,
    rows: usize,
    cols: usize,
    max_length: usize,
    rng: &mut R,
) -> Route {
    let mut cells = vec![start];
    let mut current = start;

    while current != goal && cells.len() < max_length {
        let options: Vec<Cell> = current
            .neighbors()
            .into_iter()
            .filter(|c| c.in_bounds(rows, cols))
            .collect();
        let Some(&next) = options.choose(rng) else {
            break;
        };
        cells.push(next);
        current = next;
    }

    Route::anchored(cells, start)
}

/// Roulette wheel over inverse cost, built once per generation.
///
/// Each individual weighs `1 / (cost + SELECTION_EPSILON)`. A draw picks a
/// uniform value in `[0, total)` and returns the first individual whose
/// cumulative weight meets or exceeds it.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
}

impl RouletteWheel {
    /// # Panics
    /// Panics if `individuals` is empty.
    pub fn new(individuals: &[Individual]) -> Self {
        assert!(!individuals.is_empty(), "selection from an empty population");

        let cumulative = individuals
            .iter()
            .scan(0.0, |sum, ind| {
                *sum += 1.0 / (ind.cost() + SELECTION_EPSILON);
                Some(*sum)
            })
            .collect();
        Self { cumulative }
    }

    /// Sum of all weights.
    #[inline]
    pub fn total(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    /// Draw one index.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let target = rng.gen_range(0.0..self.total());
        self.cumulative
            .partition_point(|&c| c < target)
            .min(self.cumulative.len() - 1)
    }
}

/// Draw a single index by roulette-wheel selection.
///
/// # Panics
/// Panics if `individuals` is empty.
pub fn roulette_select<R: Rng + ?Sized>(individuals: &[Individual], rng: &mut R) -> usize {
    RouletteWheel::new(individuals).select(rng)
}

/// Point mutation kinds, chosen uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MutationOp {
    Modify,
    Insert,
    Delete,
}

const MUTATION_OPS: [MutationOp; 3] = [MutationOp::Modify, MutationOp::Insert, MutationOp::Delete];

#[inline]
fn random_neighbor<R: Rng + ?Sized>(cell: Cell, rng: &mut R) -> Cell {
    cell.neighbors()[rng.gen_range(0..4)]
}

/// Crossover and mutation bound to one run's parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteOperators {
    /// Cell every route is re-anchored to.
    pub start: Cell,
    /// Hard cap on route length.
    pub max_path_length: usize,
    /// Per-position mutation probability.
    pub mutation_rate: f64,
    /// Per-pair crossover probability.
    pub crossover_rate: f64,
}

impl From<&RouteSearchConfig> for RouteOperators {
    fn from(config: &RouteSearchConfig) -> Self {
        Self {
            start: config.start_cell,
            max_path_length: config.max_path_length,
            mutation_rate: config.mutation_rate,
            crossover_rate: config.crossover_rate,
        }
    }
}

impl RouteOperators {
    /// Single-cut splice crossover with independent cut points per parent.
    ///
    /// With probability `1 - crossover_rate`, or when either parent has a
    /// single cell, the children are copies of the parents. Both children
    /// are re-anchored at the start cell and capped at `max_path_length`.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Route,
        parent2: &Route,
        rng: &mut R,
    ) -> (Route, Route) {
        if parent1.len() > 1 && parent2.len() > 1 && rng.gen_bool(self.crossover_rate) {
            let cut1 = rng.gen_range(1..parent1.len());
            let cut2 = rng.gen_range(1..parent2.len());
            let (head1, tail1) = parent1.cells().split_at(cut1);
            let (head2, tail2) = parent2.cells().split_at(cut2);

            (self.splice(head1, tail2), self.splice(head2, tail1))
        } else {
            (
                Route::anchored(parent1.cells().to_vec(), self.start),
                Route::anchored(parent2.cells().to_vec(), self.start),
            )
        }
    }

    fn splice(&self, head: &[Cell], tail: &[Cell]) -> Route {
        let cells = head
            .iter()
            .chain(tail)
            .take(self.max_path_length)
            .copied()
            .collect();
        Route::anchored(cells, self.start)
    }

    /// Return a mutated copy of `route`.
    ///
    /// Every position after the start cell is visited once; with probability
    /// `mutation_rate` it is modified, followed by an inserted neighbour, or
    /// deleted. A deletion ends the scan. Insert and delete are skipped when
    /// they would break the length bounds `[2, max_path_length]`.
    pub fn mutate<R: Rng + ?Sized>(&self, route: &Route, rng: &mut R) -> Route {
        let cells = route.cells();
        let mut out = Vec::with_capacity(cells.len() + 1);
        out.push(cells[0]);
        let mut len = cells.len();

        for i in 1..cells.len() {
            if !rng.gen_bool(self.mutation_rate) {
                out.push(cells[i]);
                continue;
            }

            let op = MUTATION_OPS[rng.gen_range(0..MUTATION_OPS.len())];
            if self.apply_mutation(op, cells, i, &mut out, &mut len, rng).is_break() {
                break;
            }
        }

        Route::anchored(out, self.start)
    }

    /// Apply `op` at position `i`, appending the outcome to `out`.
    ///
    /// `len` is the current route length. Breaks once a deletion has copied
    /// the remaining cells.
    fn apply_mutation<R: Rng + ?Sized>(
        &self,
        op: MutationOp,
        cells: &[Cell],
        i: usize,
        out: &mut Vec<Cell>,
        len: &mut usize,
        rng: &mut R,
    ) -> ControlFlow<()> {
        let cell = cells[i];
        match op {
            MutationOp::Modify => out.push(random_neighbor(cell, rng)),
            MutationOp::Insert if *len < self.max_path_length => {
                out.push(cell);
                out.push(random_neighbor(cell, rng));
                *len += 1;
            }
            MutationOp::Delete if *len > 2 => {
                out.extend_from_slice(&cells[i + 1..]);
                *len -= 1;
                return ControlFlow::Break(());
            }
            _ => out.push(cell),
        }
        ControlFlow::Continue(())
    }
}
