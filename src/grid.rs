use crate::error::{ConfigError, Result};
use crate::types::{Cell, Coordinate};
use log::debug;
use noise::{NoiseFn, Perlin};
use rand::prelude::*;

/// Immutable rectangular occupancy grid, `cells[row][col]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Builds a grid from 0/1 markers, rejecting empty, ragged or non-binary input.
    pub fn from_markers(markers: Vec<Vec<u8>>) -> Result<Self> {
        let rows = markers.len();
        let cols = markers.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(rows);
        for (row, line) in markers.into_iter().enumerate() {
            if line.len() != cols {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            let mut parsed = Vec::with_capacity(cols);
            for (col, value) in line.into_iter().enumerate() {
                let cell = Cell::from_marker(value)
                    .ok_or(ConfigError::InvalidMarker { row, col, value })?;
                parsed.push(cell);
            }
            cells.push(parsed);
        }

        Ok(Self { cells, rows, cols })
    }

    /// Procedural obstacle field.
    ///
    /// Perlin noise is sampled over the grid and every cell whose value is
    /// above `threshold` becomes an obstacle. Without a seed one is drawn
    /// from the thread RNG; with a seed the result is reproducible.
    pub fn generate(rows: usize, cols: usize, seed: Option<u32>, threshold: f64) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let seed: u32 = seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        let perlin = Perlin::new(seed);
        debug!("generating {}x{} grid with seed {}", rows, cols, seed);

        let mut cells = vec![vec![Cell::Free; cols]; rows];
        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                let nx = col as f64 / cols as f64;
                let ny = row as f64 / rows as f64;
                let value = perlin.get([nx * 4.0, ny * 4.0]);

                *cell = if value > threshold {
                    Cell::Obstacle
                } else {
                    Cell::Free
                };
            }
        }

        Ok(Self { cells, rows, cols })
    }

    /// Frees one cell; out-of-bounds coordinates are ignored.
    pub fn clear(&mut self, coord: Coordinate) {
        if self.in_bounds(coord) {
            self.cells[coord.row][coord.col] = Cell::Free;
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn cell(&self, coord: Coordinate) -> Option<Cell> {
        self.cells.get(coord.row)?.get(coord.col).copied()
    }

    pub fn is_free(&self, coord: Coordinate) -> bool {
        self.cell(coord) == Some(Cell::Free)
    }

    /// Back to the 0/1 representation used in configuration files.
    pub fn markers(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|line| line.iter().map(|cell| cell.marker()).collect())
            .collect()
    }

    pub fn free_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Free)
            .count()
    }
}
