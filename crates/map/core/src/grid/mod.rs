//! Fixed-size display grid shared by the overhead walker and the battlefield builder.
//!
//! A [`Grid`] is a rectangular, row-major array of [`Cell`] values. Writes go
//! through [`Grid::set`], which rejects coordinates outside the grid instead of
//! clamping them.
mod frame;
mod render;

pub use frame::Frame;
pub use render::GridRenderer;

use std::fmt;

use crate::error::{ErrorSeverity, MapError};
use crate::symbol::Glyph;

/// Grid coordinate expressed as (row, column).
///
/// Components are signed so that traversal steps past the edge are still
/// representable and can be rejected by [`Grid::set`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the position shifted by `(d_row, d_col)`.
    #[inline]
    pub const fn offset(self, (d_row, d_col): (i32, i32)) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Cell halfway between `self` and `other`, rounding towards `self`.
    pub const fn midpoint(self, other: Self) -> Self {
        Self::new(
            self.row + (other.row - self.row) / 2,
            self.col + (other.col - self.col) / 2,
        )
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Connector glyph drawn between two rooms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connector {
    Vertical,
    Horizontal,
    /// `/`: north-east to south-west.
    Rising,
    /// `\`: north-west to south-east.
    Falling,
}

impl Connector {
    pub const fn glyph(self) -> char {
        match self {
            Connector::Vertical => '|',
            Connector::Horizontal => '─',
            Connector::Rising => '/',
            Connector::Falling => '\\',
        }
    }
}

/// A single grid slot. Cells are replaced wholesale on write.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Blank space.
    #[default]
    Empty,
    /// Raw template character, as produced by the template parser.
    Symbol(char),
    /// Frame decoration (walls, open floor) that rooms may be drawn over.
    Background(Glyph),
    Connector(Connector),
    Room(Glyph),
}

impl Cell {
    pub fn is_room(&self) -> bool {
        matches!(self, Cell::Room(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => f.write_str(" "),
            Cell::Symbol(symbol) => write!(f, "{symbol}"),
            Cell::Background(glyph) | Cell::Room(glyph) => f.write_str(glyph.as_str()),
            Cell::Connector(connector) => write!(f, "{}", connector.glyph()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        position: GridPos,
        width: usize,
        height: usize,
    },
}

impl MapError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            GridError::OutOfBounds { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
        }
    }
}

/// Rectangular `width x height` array of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid filled with [`Cell::Empty`].
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Cell::Empty)
    }

    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Geometric centre; for even sizes the lower median is used.
    pub fn center(&self) -> GridPos {
        GridPos::new(
            (self.height.saturating_sub(1) / 2) as i32,
            (self.width.saturating_sub(1) / 2) as i32,
        )
    }

    pub fn contains(&self, position: GridPos) -> bool {
        position.row >= 0
            && position.col >= 0
            && (position.row as usize) < self.height
            && (position.col as usize) < self.width
    }

    fn index(&self, position: GridPos) -> Option<usize> {
        self.contains(position)
            .then(|| position.row as usize * self.width + position.col as usize)
    }

    pub fn get(&self, position: GridPos) -> Option<&Cell> {
        self.index(position).map(|index| &self.cells[index])
    }

    /// Replaces the cell at `position`.
    ///
    /// Out-of-range writes are rejected and leave the grid untouched.
    pub fn set(&mut self, position: GridPos, cell: Cell) -> Result<(), GridError> {
        let index = self.index(position).ok_or(GridError::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        })?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Iterates rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // chunks(0) panics; a zero-width grid has no visible rows anyway.
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Iterates every cell with its position in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (GridPos, &Cell)> + '_ {
        self.rows().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, cell)| (GridPos::new(row as i32, col as i32), cell))
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&GridRenderer::render(self))
    }
}
