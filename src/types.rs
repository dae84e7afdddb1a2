//! # Core Types Module
//!
//! Plain value types shared by every part of the search: grid coordinates,
//! cell markers, movement actions and the search state machine.
//!
//! ## Key Components
//!
//! - **Coordinate**: a `(row, col)` cell address, used as a hash/ordering key
//! - **Cell**: binary occupancy marker (0 = free, 1 = obstacle)
//! - **Action**: the four grid moves, in canonical `Up, Down, Left, Right` order
//! - **SearchStatus**: lifecycle of one search run
//!
//! All types are serializable so configurations and reports can be exchanged as JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EnvironmentError;

/// NOTE - Full battery level, also the level right after a recharge
pub const BATTERY_CAPACITY: u32 = 100;

/// NOTE - Flat cost of every move that does not start on the start cell
pub const STEP_COST: u32 = 10;

/// NOTE - Cost of a move leaving the start cell
pub const FIRST_STEP_COST: u32 = 0;

/// NOTE - Side length of the built-in demonstration grid
pub const DEFAULT_GRID_SIZE: usize = 10;

/// A cell address on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Number of grid steps between two cells when nothing is in the way.
    pub fn manhattan(&self, other: Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// NOTE - Occupancy of a single grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Free,     // NOTE - Marker 0, traversable
    Obstacle, // NOTE - Marker 1, impassable
}

impl Cell {
    pub fn from_marker(marker: u8) -> Option<Cell> {
        match marker {
            0 => Some(Cell::Free),
            1 => Some(Cell::Obstacle),
            _ => None,
        }
    }

    pub fn marker(self) -> u8 {
        match self {
            Cell::Free => 0,
            Cell::Obstacle => 1,
        }
    }
}

/// NOTE - The four moves an agent can make
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,    // NOTE - row - 1
    Down,  // NOTE - row + 1
    Left,  // NOTE - col - 1
    Right, // NOTE - col + 1
}

impl Action {
    /// Canonical enumeration order; successor generation follows it.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// `(row, col)` delta applied by this move.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EnvironmentError::UnknownAction(s.to_string()))
    }
}

/// NOTE - Lifecycle of a search run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    Initial,   // NOTE - Battery full, nothing explored yet
    Running,   // NOTE - Frontier non-empty, expanding nodes
    GoalFound, // NOTE - Terminal, path available
    Exhausted, // NOTE - Terminal, frontier emptied without reaching the goal
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchStatus::GoalFound | SearchStatus::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_map_to_cells() {
        assert_eq!(Cell::from_marker(0), Some(Cell::Free));
        assert_eq!(Cell::from_marker(1), Some(Cell::Obstacle));
        assert_eq!(Cell::from_marker(2), None);
        assert_eq!(Cell::Obstacle.marker(), 1);
    }

    #[test]
    fn action_names_parse_case_insensitively() {
        assert_eq!("up".parse::<Action>().unwrap(), Action::Up);
        assert_eq!(" Right ".parse::<Action>().unwrap(), Action::Right);
        assert!(matches!(
            "NORTH".parse::<Action>(),
            Err(EnvironmentError::UnknownAction(name)) if name == "NORTH"
        ));
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Coordinate::new(0, 7);
        let b = Coordinate::new(4, 2);
        assert_eq!(a.manhattan(b), 9);
        assert_eq!(b.manhattan(a), 9);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn only_goal_found_and_exhausted_are_terminal() {
        assert!(!SearchStatus::Initial.is_terminal());
        assert!(!SearchStatus::Running.is_terminal());
        assert!(SearchStatus::GoalFound.is_terminal());
        assert!(SearchStatus::Exhausted.is_terminal());
    }

    #[test]
    fn coordinates_order_row_major() {
        assert!(Coordinate::new(0, 9) < Coordinate::new(1, 0));
        assert_eq!(Coordinate::from((3, 4)).to_string(), "(3, 4)");
    }
}
