//! Configuration types for grid route search parameters.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Cell, SurfaceCategory};

/// Top-level configuration for a route search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSearchConfig {
    /// Grid height in cells.
    #[serde(default = "default_grid_size")]
    pub grid_rows: usize,
    /// Grid width in cells.
    #[serde(default = "default_grid_size")]
    pub grid_cols: usize,
    /// Fixed first cell of every route.
    #[serde(default = "default_start_cell")]
    pub start_cell: Cell,
    /// Cell the search tries to reach.
    #[serde(default = "default_goal_cell")]
    pub goal_cell: Cell,
    /// Number of individuals per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Generation budget.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Per-position mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Crossover probability per parent pair (0.0-1.0).
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Maximum number of cells in a route.
    #[serde(default = "default_max_path_length")]
    pub max_path_length: usize,
    /// Multiplier applied to the summed surface cost.
    #[serde(default = "default_surface_weight")]
    pub surface_weight: f64,
    /// Cost per Manhattan step between the route end and the goal.
    #[serde(default = "default_distance_factor")]
    pub distance_factor: f64,
    /// Cost per cell in the route.
    #[serde(default = "default_length_penalty")]
    pub length_penalty: f64,
    /// Fraction of each generation carried over unchanged.
    #[serde(default = "default_elite_fraction")]
    pub elite_fraction: f64,
    /// Penalty per consecutive pair that is not Manhattan-adjacent.
    #[serde(default = "default_penalty")]
    pub adjacency_penalty: f64,
    /// Surface cost charged for a cell outside the grid.
    #[serde(default = "default_penalty")]
    pub out_of_bounds_penalty: f64,
    /// Traversal cost per surface category.
    #[serde(default)]
    pub category_costs: CategoryCosts,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for RouteSearchConfig {
    fn default() -> Self {
        Self {
            grid_rows: default_grid_size(),
            grid_cols: default_grid_size(),
            start_cell: default_start_cell(),
            goal_cell: default_goal_cell(),
            population_size: default_population_size(),
            max_generations: default_max_generations(),
            mutation_rate: default_mutation_rate(),
            crossover_rate: default_crossover_rate(),
            max_path_length: default_max_path_length(),
            surface_weight: default_surface_weight(),
            distance_factor: default_distance_factor(),
            length_penalty: default_length_penalty(),
            elite_fraction: default_elite_fraction(),
            adjacency_penalty: default_penalty(),
            out_of_bounds_penalty: default_penalty(),
            category_costs: CategoryCosts::default(),
            random_seed: None,
        }
    }
}

fn default_grid_size() -> usize {
    20
}
fn default_start_cell() -> Cell {
    Cell::new(0, 0)
}
fn default_goal_cell() -> Cell {
    Cell::new(19, 19)
}
fn default_population_size() -> usize {
    1500
}
fn default_max_generations() -> usize {
    500
}
fn default_mutation_rate() -> f64 {
    0.05
}
fn default_crossover_rate() -> f64 {
    0.8
}
fn default_max_path_length() -> usize {
    70
}
fn default_surface_weight() -> f64 {
    10.0
}
fn default_distance_factor() -> f64 {
    100.0
}
fn default_length_penalty() -> f64 {
    0.01
}
fn default_elite_fraction() -> f64 {
    0.1
}
fn default_penalty() -> f64 {
    999_999.0
}

/// Traversal cost lookup table, one entry per [`SurfaceCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryCosts {
    #[serde(default = "default_smooth_cost")]
    pub smooth: f64,
    #[serde(default = "default_grassy_cost")]
    pub grassy: f64,
    #[serde(default = "default_sandy_cost")]
    pub sandy: f64,
    #[serde(default = "default_rocky_cost")]
    pub rocky: f64,
}

impl Default for CategoryCosts {
    fn default() -> Self {
        Self {
            smooth: default_smooth_cost(),
            grassy: default_grassy_cost(),
            sandy: default_sandy_cost(),
            rocky: default_rocky_cost(),
        }
    }
}

fn default_smooth_cost() -> f64 {
    1.0
}
fn default_grassy_cost() -> f64 {
    2.0
}
fn default_sandy_cost() -> f64 {
    3.0
}
fn default_rocky_cost() -> f64 {
    4.0
}

impl CategoryCosts {
    /// Cost of traversing one cell of the given category.
    #[inline]
    pub fn cost(&self, category: SurfaceCategory) -> f64 {
        match category {
            SurfaceCategory::Smooth => self.smooth,
            SurfaceCategory::Grassy => self.grassy,
            SurfaceCategory::Sandy => self.sandy,
            SurfaceCategory::Rocky => self.rocky,
        }
    }

    /// Check that every category has a positive, finite cost.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in SurfaceCategory::ALL {
            let cost = self.cost(category);
            if !(cost.is_finite() && cost > 0.0) {
                return Err(ConfigError::InvalidCategoryCost { category, cost });
            }
        }
        Ok(())
    }
}

const ELITE_ROUNDING_EPSILON: f64 = 1e-9;

impl RouteSearchConfig {
    /// Number of elites carried into each new generation (floor of the fraction).
    ///
    /// Always leaves at least one slot for offspring.
    #[inline]
    pub fn elite_count(&self) -> usize {
        // 100 * 0.29 is 28.999..., so nudge past representation error before flooring.
        let exact = self.population_size as f64 * self.elite_fraction;
        let count = (exact + ELITE_ROUNDING_EPSILON).floor() as usize;
        count.min(self.population_size.saturating_sub(1))
    }

    /// Check whether a cell lies inside the configured grid.
    #[inline]
    pub fn in_grid(&self, cell: Cell) -> bool {
        cell.in_bounds(self.grid_rows, self.grid_cols)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if i32::try_from(self.grid_rows).is_err() || i32::try_from(self.grid_cols).is_err() {
            return Err(ConfigError::InvalidDimensions);
        }
        if !self.in_grid(self.start_cell) {
            return Err(ConfigError::CellOutOfGrid {
                name: "start_cell",
                cell: self.start_cell,
            });
        }
        if !self.in_grid(self.goal_cell) {
            return Err(ConfigError::CellOutOfGrid {
                name: "goal_cell",
                cell: self.goal_cell,
            });
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if self.max_path_length < 2 {
            return Err(ConfigError::PathLengthTooShort);
        }

        let check_rate = |value: f64, name: &'static str| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::InvalidRate { name, value })
            }
        };
        check_rate(self.mutation_rate, "mutation_rate")?;
        check_rate(self.crossover_rate, "crossover_rate")?;

        if !(0.0..1.0).contains(&self.elite_fraction) {
            return Err(ConfigError::InvalidRate {
                name: "elite_fraction",
                value: self.elite_fraction,
            });
        }

        let check_weight = |value: f64, name: &'static str| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidWeight { name, value })
            }
        };
        check_weight(self.surface_weight, "surface_weight")?;
        check_weight(self.distance_factor, "distance_factor")?;
        check_weight(self.length_penalty, "length_penalty")?;
        check_weight(self.adjacency_penalty, "adjacency_penalty")?;
        check_weight(self.out_of_bounds_penalty, "out_of_bounds_penalty")?;

        self.category_costs.validate()
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions (rows, cols) must be non-zero and fit in i32")]
    InvalidDimensions,
    #[error("{name} {cell} lies outside the grid")]
    CellOutOfGrid { name: &'static str, cell: Cell },
    #[error("Population size must be at least 2")]
    PopulationTooSmall,
    #[error("Maximum path length must be at least 2")]
    PathLengthTooShort,
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("Cost for {category:?} must be finite and positive, got {cost}")]
    InvalidCategoryCost {
        category: SurfaceCategory,
        cost: f64,
    },
    #[error("Surface is {actual:?} (rows, cols) but the grid is {expected:?}")]
    SurfaceMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("Surface construction failed: {0}")]
    Surface(#[from] crate::compute::SurfaceError),
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_valid() {
        let config = RouteSearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.elite_count(), 150);
    }

    #[test]
    fn test_elite_count_floors() {
        let config = RouteSearchConfig {
            population_size: 19,
            ..Default::default()
        };
        assert_eq!(config.elite_count(), 1);
    }

    #[test]
    fn test_elite_count_survives_float_rounding() {
        for (fraction, expected) in [(0.29, 29), (0.57, 57), (0.1, 10), (0.0, 0)] {
            let config = RouteSearchConfig {
                population_size: 100,
                elite_fraction: fraction,
                ..Default::default()
            };
            assert_eq!(config.elite_count(), expected, "elite_fraction {}", fraction);
        }
    }

    #[test]
    fn test_elite_count_leaves_room_for_offspring() {
        let config = RouteSearchConfig {
            population_size: 10,
            elite_fraction: 0.999_999_999_99,
            ..Default::default()
        };
        assert_eq!(config.elite_count(), 9);
    }

    #[test]
    fn test_goal_outside_grid_rejected() {
        let config = RouteSearchConfig {
            goal_cell: Cell::new(20, 3),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CellOutOfGrid {
                name: "goal_cell",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_rates_rejected() {
        let config = RouteSearchConfig {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate {
                name: "mutation_rate",
                ..
            })
        ));

        let config = RouteSearchConfig {
            elite_fraction: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_category_cost_rejected() {
        let config = RouteSearchConfig {
            category_costs: CategoryCosts {
                sandy: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCategoryCost {
                category: SurfaceCategory::Sandy,
                ..
            })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RouteSearchConfig =
            serde_json::from_str(r#"{"grid_rows": 8, "goal_cell": {"row": 7, "col": 19}}"#)
                .unwrap();
        assert_eq!(config.grid_rows, 8);
        assert_eq!(config.grid_cols, 20);
        assert_eq!(config.goal_cell, Cell::new(7, 19));
        assert_eq!(config.population_size, 1500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"grid_rows": 5, "grid_cols": 5, "goal_cell": {{"row": 4, "col": 4}}, "population_size": 10}}"#
        )
        .unwrap();

        let config = RouteSearchConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.population_size, 10);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, r#"{{"grid_rows": 5, "grid_cols": 5}}"#).unwrap();
        // Default goal (19, 19) does not fit a 5x5 grid.
        assert!(matches!(
            RouteSearchConfig::from_json_file(bad.path()),
            Err(ConfigError::CellOutOfGrid { .. })
        ));
    }
}
