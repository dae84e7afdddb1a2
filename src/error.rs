//! Error types for the grid search

use thiserror::Error;

use crate::types::{Action, Coordinate};

/// Problems with the grid, endpoints or search parameters.
///
/// All of these are detected before a search starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid has no cells")]
    EmptyGrid,

    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell marker {value} at ({row}, {col}), expected 0 or 1")]
    InvalidMarker { row: usize, col: usize, value: u8 },

    #[error("{what} {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        what: &'static str,
        coord: Coordinate,
        rows: usize,
        cols: usize,
    },

    #[error("battery capacity must be positive")]
    ZeroCapacity,

    #[error("step cost {cost} exceeds battery capacity {capacity}")]
    StepCostExceedsCapacity { cost: u32, capacity: u32 },

    #[error("move cost {cost} over {cells} cells overflows the path cost")]
    CostOverflow { cost: u64, cells: u64 },

    #[error("invalid grid size: {0}")]
    GridSize(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of environment queries.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("action {action} from {state} leaves the grid")]
    InvalidAction { state: Coordinate, action: Action },

    #[error("unknown action: {0}")]
    UnknownAction(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
