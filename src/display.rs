use std::collections::HashSet;
use std::io::{Result, Write};
use crossterm::{
    QueueableCommand,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use crate::grid::Grid;
use crate::types::{Cell, Coordinate};

/// Terminal plot of a grid with a path drawn over it.
///
/// Legend: `S` start (first path cell), `G` goal (last path cell), `*` path,
/// `#` obstacle, `.` free.
pub struct Display;

impl Display {
    /// Uncoloured rendering, one line per grid row.
    pub fn ascii(grid: &Grid, path: &[Coordinate]) -> String {
        let overlay = Overlay::new(path);
        let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                out.push(overlay.glyph(grid, Coordinate::new(row, col)).0);
            }
            out.push('\n');
        }
        out
    }

    /// Coloured rendering through crossterm commands.
    pub fn render<W: Write>(out: &mut W, grid: &Grid, path: &[Coordinate]) -> Result<()> {
        let overlay = Overlay::new(path);

        out.queue(Print(format!("Grid {}x{}", grid.rows(), grid.cols())))?;
        if let (Some(start), Some(goal)) = (path.first(), path.last()) {
            out.queue(Print(format!(" | S {} -> G {}", start, goal)))?;
        }
        out.queue(Print("\nLegend: [S]tart | [G]oal | [*]Path | [.]Free | [#]Obstacle\n\n"))?;

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let (glyph, color) = overlay.glyph(grid, Coordinate::new(row, col));
                if glyph == '#' {
                    out.queue(SetForegroundColor(Color::Black))?;
                    out.queue(SetBackgroundColor(Color::DarkGrey))?;
                } else {
                    out.queue(SetForegroundColor(color))?;
                }
                out.queue(Print(glyph))?;
                out.queue(ResetColor)?;
                out.queue(Print(' '))?;
            }
            out.queue(Print('\n'))?;
        }

        out.queue(Print('\n'))?;
        out.flush()?;
        Ok(())
    }
}

struct Overlay {
    start: Option<Coordinate>,
    goal: Option<Coordinate>,
    cells: HashSet<Coordinate>,
}

impl Overlay {
    fn new(path: &[Coordinate]) -> Self {
        Self {
            start: path.first().copied(),
            goal: path.last().copied(),
            cells: path.iter().copied().collect(),
        }
    }

    fn glyph(&self, grid: &Grid, coord: Coordinate) -> (char, Color) {
        if Some(coord) == self.start {
            ('S', Color::Green)
        } else if Some(coord) == self.goal {
            ('G', Color::Red)
        } else if self.cells.contains(&coord) {
            ('*', Color::Yellow)
        } else {
            match grid.cell(coord) {
                Some(Cell::Obstacle) => ('#', Color::DarkGrey),
                _ => ('.', Color::White),
            }
        }
    }
}
