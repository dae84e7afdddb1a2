//! # Environment Module
//!
//! Read-only query interface over a grid with fixed start and goal cells.
//! The environment holds no mutable state; every search works against a
//! shared reference to it.

use crate::error::{ConfigError, EnvironmentError};
use crate::grid::Grid;
use crate::types::{Action, Coordinate};

#[derive(Debug)]
pub struct Environment {
    grid: Grid,
    start: Coordinate,
    goal: Coordinate,
}

impl Environment {
    /// Binds a grid to its endpoints. Both endpoints must lie on the grid.
    pub fn new(grid: Grid, start: Coordinate, goal: Coordinate) -> Result<Self, ConfigError> {
        for (what, coord) in [("start", start), ("goal", goal)] {
            if !grid.in_bounds(coord) {
                return Err(ConfigError::OutOfBounds {
                    what,
                    coord,
                    rows: grid.rows(),
                    cols: grid.cols(),
                });
            }
        }

        Ok(Self { grid, start, goal })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn goal(&self) -> Coordinate {
        self.goal
    }

    /// Moves from `state` that stay on the grid and land on a free cell,
    /// in canonical `Up, Down, Left, Right` order.
    pub fn actions(&self, state: Coordinate) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| {
                self.result(state, action)
                    .is_ok_and(|next| self.grid.is_free(next))
            })
            .collect()
    }

    /// Applies the action's offset to `state`.
    pub fn result(
        &self,
        state: Coordinate,
        action: Action,
    ) -> Result<Coordinate, EnvironmentError> {
        let (dr, dc) = action.offset();
        let next = state
            .row
            .checked_add_signed(dr)
            .zip(state.col.checked_add_signed(dc))
            .map(Coordinate::from)
            .filter(|&next| self.grid.in_bounds(next));

        next.ok_or(EnvironmentError::InvalidAction { state, action })
    }

    pub fn is_goal(&self, state: Coordinate) -> bool {
        state == self.goal
    }
}
