// Grid pathfinding library: uniform-cost search under a battery constraint
// Exposes every module for the runner binary and integration tests

pub mod types;          // Base types (Coordinate, Cell, Action, SearchStatus)
pub mod error;          // Configuration and environment errors
pub mod grid;           // Occupancy grid, validation and procedural generation
pub mod environment;    // Legal moves, move results and goal test
pub mod agent;          // Uniform-cost search with battery bookkeeping
pub mod display;        // Terminal rendering of grid and path
pub mod report;         // Status lines and JSON summary of a run
pub mod config;         // Run configuration (grid literal, endpoints, cost model)

// Re-exports of the main types for easier imports
pub use types::*;
pub use error::{ConfigError, EnvironmentError};
pub use grid::Grid;
pub use environment::Environment;
pub use agent::{Agent, Battery, RechargeEvent, SearchNode, SearchOutcome};
pub use display::Display;
pub use report::{SearchReport, create_search_report};
pub use config::{RunConfig, SearchConfig};
