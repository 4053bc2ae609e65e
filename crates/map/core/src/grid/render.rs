//! Text serialization of finished grids.
use std::fmt::Write;

use super::Grid;

/// Serializes a [`Grid`] into display text.
///
/// One line per row, cells separated by a single space, rows joined by `\n`.
/// Nothing is trimmed: the grid is expected to be rectangular already.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridRenderer;

impl GridRenderer {
    pub const CELL_SEPARATOR: char = ' ';

    pub fn render(grid: &Grid) -> String {
        let mut out = String::with_capacity(grid.width() * grid.height() * 2);

        for (index, row) in grid.rows().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    out.push(Self::CELL_SEPARATOR);
                }
                // Writing into a String cannot fail.
                let _ = write!(out, "{cell}");
            }
        }

        out
    }
}
