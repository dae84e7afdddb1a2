//! Configuration loading for a search run

use crate::environment::Environment;
use crate::error::{ConfigError, Result};
use crate::grid::Grid;
use crate::types::{BATTERY_CAPACITY, Coordinate, DEFAULT_GRID_SIZE, FIRST_STEP_COST, STEP_COST};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in demonstration grid (0 = free, 1 = obstacle)
const DEMO_GRID: [[u8; DEFAULT_GRID_SIZE]; DEFAULT_GRID_SIZE] = [
    [0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
    [0, 1, 1, 0, 1, 0, 1, 1, 1, 0],
    [0, 1, 0, 0, 0, 0, 0, 0, 1, 0],
    [0, 1, 0, 1, 1, 1, 1, 0, 1, 0],
    [0, 0, 0, 1, 0, 0, 1, 0, 0, 0],
    [1, 1, 0, 1, 0, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 1, 0, 0, 0, 0],
    [0, 1, 1, 1, 0, 1, 0, 1, 1, 0],
    [0, 0, 0, 1, 0, 0, 0, 1, 0, 0],
    [1, 1, 0, 0, 0, 1, 0, 0, 0, 0],
];

/// Battery and cost model of the search
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Level of a full battery (default: 100)
    #[serde(default = "default_capacity")]
    pub battery_capacity: u32,

    /// Cost of a move that does not leave the start cell (default: 10)
    #[serde(default = "default_step_cost")]
    pub step_cost: u32,

    /// Cost of a move leaving the start cell (default: 0)
    #[serde(default = "default_first_step_cost")]
    pub first_step_cost: u32,
}

fn default_capacity() -> u32 {
    BATTERY_CAPACITY
}

fn default_step_cost() -> u32 {
    STEP_COST
}

fn default_first_step_cost() -> u32 {
    FIRST_STEP_COST
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            battery_capacity: default_capacity(),
            step_cost: default_step_cost(),
            first_step_cost: default_first_step_cost(),
        }
    }
}

impl SearchConfig {
    /// A move costing more than a full battery could never be admitted.
    pub fn validate(&self) -> Result<()> {
        if self.battery_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        for cost in [self.step_cost, self.first_step_cost] {
            if cost > self.battery_capacity {
                return Err(ConfigError::StepCostExceedsCapacity {
                    cost,
                    capacity: self.battery_capacity,
                });
            }
        }
        Ok(())
    }
}

/// Everything a single run needs: the grid literal, its endpoints and the cost model
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Rows of 0/1 markers
    pub grid: Vec<Vec<u8>>,
    pub start: Coordinate,
    pub goal: Coordinate,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid: DEMO_GRID.iter().map(|row| row.to_vec()).collect(),
            start: Coordinate::new(0, 0),
            goal: Coordinate::new(DEFAULT_GRID_SIZE - 1, DEFAULT_GRID_SIZE - 1),
            search: SearchConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load a run configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Configuration around an existing grid, e.g. a generated one
    pub fn from_grid(grid: &Grid, start: Coordinate, goal: Coordinate) -> Self {
        Self {
            grid: grid.markers(),
            start,
            goal,
            search: SearchConfig::default(),
        }
    }

    /// Validates everything up front and binds the grid to its endpoints
    pub fn build_environment(&self) -> Result<Environment> {
        self.search.validate()?;
        let grid = Grid::from_markers(self.grid.clone())?;
        Environment::new(grid, self.start, self.goal)
    }
}
