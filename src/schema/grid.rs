//! Grid coordinate and surface category types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A grid coordinate.
///
/// Coordinates are signed: mutation may step a route outside the grid, and
/// such cells are scored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another cell, saturating at `u32::MAX`.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }

    /// True if the two cells are orthogonal neighbours (distance exactly 1).
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// The four orthogonal neighbours: up, down, left, right.
    ///
    /// At the edge of the `i32` range the step saturates, so that neighbour
    /// is the cell itself.
    #[inline]
    pub fn neighbors(self) -> [Cell; 4] {
        [
            Cell::new(self.row.saturating_sub(1), self.col),
            Cell::new(self.row.saturating_add(1), self.col),
            Cell::new(self.row, self.col.saturating_sub(1)),
            Cell::new(self.row, self.col.saturating_add(1)),
        ]
    }

    /// Check whether the cell lies inside a `rows x cols` grid.
    #[inline]
    pub fn in_bounds(self, rows: usize, cols: usize) -> bool {
        self.row >= 0
            && self.col >= 0
            && (self.row as usize) < rows
            && (self.col as usize) < cols
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Surface category of a grid cell. Costs live in [`super::CategoryCosts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceCategory {
    Smooth,
    Grassy,
    Sandy,
    Rocky,
}

impl SurfaceCategory {
    /// Every category, cheapest default cost first.
    pub const ALL: [SurfaceCategory; 4] = [
        SurfaceCategory::Smooth,
        SurfaceCategory::Grassy,
        SurfaceCategory::Sandy,
        SurfaceCategory::Rocky,
    ];

    /// Display character for text rendering.
    pub fn symbol(&self) -> char {
        match self {
            SurfaceCategory::Smooth => '.',
            SurfaceCategory::Grassy => ',',
            SurfaceCategory::Sandy => '~',
            SurfaceCategory::Rocky => '^',
        }
    }
}
