//! Static cost surface: a grid of surface categories with a cost table.

use rand::Rng;

use crate::schema::{CategoryCosts, Cell, SurfaceCategory};

/// Read-only traversal cost grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSurface {
    rows: usize,
    cols: usize,
    /// Row-major categories.
    cells: Vec<SurfaceCategory>,
    costs: CategoryCosts,
}

/// Surface construction errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Expected {expected} cells for the grid, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("At least one surface category is required")]
    NoCategories,
}

impl CostSurface {
    /// Build a surface from explicit row-major categories.
    pub fn from_categories(
        rows: usize,
        cols: usize,
        cells: Vec<SurfaceCategory>,
        costs: CategoryCosts,
    ) -> Result<Self, SurfaceError> {
        let expected = rows * cols;
        if cells.len() != expected {
            return Err(SurfaceError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            cells,
            costs,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn costs(&self) -> &CategoryCosts {
        &self.costs
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.rows, self.cols)
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.row as usize * self.cols + cell.col as usize)
    }

    /// Category at `cell`, or `None` outside the grid.
    pub fn category_at(&self, cell: Cell) -> Option<SurfaceCategory> {
        self.index(cell).map(|i| self.cells[i])
    }

    /// Traversal cost at `cell`, or `None` outside the grid.
    pub fn cost_at(&self, cell: Cell) -> Option<f64> {
        self.category_at(cell).map(|c| self.costs.cost(c))
    }

    /// Iterate over rows of categories.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[SurfaceCategory]> {
        self.cells.chunks(self.cols.max(1))
    }
}

/// Generate a surface where every cell draws a category uniformly from `categories`.
pub fn generate_surface<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    categories: &[SurfaceCategory],
    costs: CategoryCosts,
    rng: &mut R,
) -> Result<CostSurface, SurfaceError> {
    if categories.is_empty() {
        return Err(SurfaceError::NoCategories);
    }

    let cells = (0..rows * cols)
        .map(|_| categories[rng.gen_range(0..categories.len())])
        .collect();

    CostSurface::from_categories(rows, cols, cells, costs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_cost_lookup() {
        let surface = CostSurface::from_categories(
            1,
            2,
            vec![SurfaceCategory::Smooth, SurfaceCategory::Grassy],
            CategoryCosts::default(),
        )
        .unwrap();

        assert_eq!(surface.cost_at(Cell::new(0, 0)), Some(1.0));
        assert_eq!(surface.cost_at(Cell::new(0, 1)), Some(2.0));
        assert_eq!(surface.cost_at(Cell::new(0, 2)), None);
        assert_eq!(surface.cost_at(Cell::new(-1, 0)), None);
    }

    #[test]
    fn test_cell_count_mismatch() {
        let err = CostSurface::from_categories(
            2,
            2,
            vec![SurfaceCategory::Smooth],
            CategoryCosts::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SurfaceError::CellCountMismatch {
                expected: 4,
                actual: 1
            }
        );
    }

    #[test]
    fn test_generate_is_seeded() {
        let costs = CategoryCosts::default();
        let a = generate_surface(8, 8, &SurfaceCategory::ALL, costs, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = generate_surface(8, 8, &SurfaceCategory::ALL, costs, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows_iter().count(), 8);
    }

    #[test]
    fn test_generate_uses_only_given_categories() {
        let mut rng = StdRng::seed_from_u64(1);
        let surface = generate_surface(
            5,
            6,
            &[SurfaceCategory::Rocky],
            CategoryCosts::default(),
            &mut rng,
        )
        .unwrap();
        for row in 0..5 {
            for col in 0..6 {
                assert_eq!(
                    surface.category_at(Cell::new(row, col)),
                    Some(SurfaceCategory::Rocky)
                );
            }
        }

        assert_eq!(
            generate_surface(2, 2, &[], CategoryCosts::default(), &mut rng),
            Err(SurfaceError::NoCategories)
        );
    }

    #[test]
    fn test_generate_covers_all_categories() {
        let mut rng = StdRng::seed_from_u64(3);
        let surface = generate_surface(
            20,
            20,
            &SurfaceCategory::ALL,
            CategoryCosts::default(),
            &mut rng,
        )
        .unwrap();
        for category in SurfaceCategory::ALL {
            assert!(surface.rows_iter().flatten().any(|c| *c == category));
        }
    }
}
