//! Route encoding: an ordered, non-empty sequence of grid cells.

use serde::{Deserialize, Serialize};

use super::Cell;

/// A candidate route.
///
/// Routes always hold at least one cell. Consecutive cells are not required
/// to be adjacent and cells may lie outside the grid; the fitness evaluator
/// penalizes both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Route {
    cells: Vec<Cell>,
}

/// Route construction errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("A route must contain at least one cell")]
    Empty,
}

impl Route {
    /// Build a route from cells, rejecting an empty sequence.
    pub fn new(cells: Vec<Cell>) -> Result<Self, RouteError> {
        if cells.is_empty() {
            return Err(RouteError::Empty);
        }
        Ok(Self { cells })
    }

    /// Build a route from operator output and pin its first cell to `start`.
    ///
    /// # Panics
    /// Panics if `cells` is empty; operators never shrink a route below one cell.
    pub(crate) fn anchored(mut cells: Vec<Cell>, start: Cell) -> Self {
        assert!(!cells.is_empty(), "operator produced an empty route");
        cells[0] = start;
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Cell {
        self.cells[0]
    }

    #[inline]
    pub fn last(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of consecutive pairs that are not Manhattan-adjacent.
    pub fn broken_steps(&self) -> usize {
        self.cells
            .windows(2)
            .filter(|pair| !pair[0].is_adjacent(pair[1]))
            .count()
    }

    /// Number of cells outside a `rows x cols` grid.
    pub fn out_of_bounds_cells(&self, rows: usize, cols: usize) -> usize {
        self.cells
            .iter()
            .filter(|c| !c.in_bounds(rows, cols))
            .count()
    }

    /// True if every cell is inside the grid and every step is adjacent.
    pub fn is_well_formed(&self, rows: usize, cols: usize) -> bool {
        self.broken_steps() == 0 && self.out_of_bounds_cells(rows, cols) == 0
    }

    /// True if the route ends on `goal`.
    #[inline]
    pub fn reaches(&self, goal: Cell) -> bool {
        self.last() == goal
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

impl TryFrom<Vec<Cell>> for Route {
    type Error = RouteError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Self::new(cells)
    }
}

impl From<Route> for Vec<Cell> {
    fn from(route: Route) -> Self {
        route.cells
    }
}
