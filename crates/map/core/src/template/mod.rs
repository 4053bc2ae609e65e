//! ASCII template parsing.
//!
//! A template is multi-line text: each line is a row, each character a column.
//! Rows may be ragged; a column past the end of its row is *absent*, which is
//! different from a space.
mod presets;

pub use presets::{BattlefieldPreset, OVERHEAD_FRAME};

use crate::error::{ErrorSeverity, MapError};
use crate::grid::{Cell, Grid, GridPos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,
}

impl MapError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            TemplateError::Empty => "TEMPLATE_EMPTY",
        }
    }
}

/// Raw symbol grid produced from template text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateGrid {
    rows: Vec<Vec<char>>,
}

impl TemplateGrid {
    /// Parses template text into rows of symbols.
    ///
    /// Both `\n` and `\r\n` line endings are accepted and a single trailing
    /// line break does not produce an extra row. Fails only when the text
    /// holds no characters besides line breaks.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        if template.chars().all(|c| c == '\n' || c == '\r') {
            return Err(TemplateError::Empty);
        }
        Ok(Self::split(template))
    }

    /// Parses one of the crate's built-in templates, which are never empty.
    pub(crate) fn preset(template: &'static str) -> Self {
        Self::split(template)
    }

    fn split(template: &str) -> Self {
        Self {
            rows: template.lines().map(|line| line.chars().collect()).collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Symbol at `position`, or `None` if the position is absent.
    pub fn symbol(&self, position: GridPos) -> Option<char> {
        if position.row < 0 || position.col < 0 {
            return None;
        }
        self.rows
            .get(position.row as usize)?
            .get(position.col as usize)
            .copied()
    }

    /// Every present symbol with its position, in row-major order.
    pub fn symbols(&self) -> impl Iterator<Item = (GridPos, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, symbols)| {
            symbols
                .iter()
                .enumerate()
                .map(move |(col, symbol)| (GridPos::new(row as i32, col as i32), *symbol))
        })
    }

    /// Number of present symbols matching `predicate`.
    pub fn count(&self, predicate: impl Fn(char) -> bool) -> usize {
        self.symbols().filter(|(_, symbol)| predicate(*symbol)).count()
    }

    /// Normalizes the ragged rows into a rectangular [`Grid`].
    ///
    /// Spaces and absent columns become [`Cell::Empty`], everything else a
    /// [`Cell::Symbol`].
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::new(self.width(), self.height());
        for (position, symbol) in self.symbols() {
            if symbol != ' ' {
                // Every template position lies inside the normalized bounds.
                let _ = grid.set(position, Cell::Symbol(symbol));
            }
        }
        grid
    }
}
