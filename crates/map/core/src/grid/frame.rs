//! Background frames that overhead maps are drawn onto.
use super::{Cell, Grid, GridPos};
use crate::symbol::Glyph;
use crate::template::{OVERHEAD_FRAME, TemplateGrid, TemplateError};

/// A background grid plus the set of cells rooms may be drawn on.
///
/// Rooms that land on a closed cell are still traversed, they are just not
/// drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    background: Grid,
    open: Vec<bool>,
}

impl Frame {
    /// Wall character used by the built-in frame templates.
    pub const WALL: char = '█';

    /// All-open frame with an empty background.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            background: Grid::new(width, height),
            open: vec![true; width * height],
        }
    }

    /// Builds a frame from a parsed template.
    ///
    /// `wall` cells become closed background, spaces and cells past the end
    /// of a short row are closed and empty, every other symbol is open floor.
    pub fn from_template(template: &TemplateGrid, wall: char) -> Self {
        let width = template.width();
        let height = template.height();
        let mut background = Grid::new(width, height);
        let mut open = vec![false; width * height];

        for (position, symbol) in template.symbols() {
            if symbol == ' ' {
                continue;
            }
            let index = position.row as usize * width + position.col as usize;
            open[index] = symbol != wall;
            // Template positions are always inside the normalized bounds.
            let _ = background.set(position, Cell::Background(Glyph::from(symbol)));
        }

        Self { background, open }
    }

    /// Parses `template` and builds a frame from it.
    pub fn parse(template: &str, wall: char) -> Result<Self, TemplateError> {
        Ok(Self::from_template(&TemplateGrid::parse(template)?, wall))
    }

    /// The 21x21 diamond used for regular overhead maps.
    pub fn overhead() -> Self {
        Self::from_template(&TemplateGrid::preset(OVERHEAD_FRAME), Self::WALL)
    }

    pub fn width(&self) -> usize {
        self.background.width()
    }

    pub fn height(&self) -> usize {
        self.background.height()
    }

    pub fn is_open(&self, position: GridPos) -> bool {
        self.background.contains(position)
            && self.open[position.row as usize * self.width() + position.col as usize]
    }

    /// Fresh copy of the background for one render.
    pub fn canvas(&self) -> Grid {
        self.background.clone()
    }

    /// Open cells at even offsets from the centre, i.e. cells a room can occupy.
    pub fn room_slots(&self) -> Vec<GridPos> {
        let center = self.background.center();
        self.background
            .cells()
            .map(|(position, _)| position)
            .filter(|position| {
                (position.row - center.row) % 2 == 0
                    && (position.col - center.col) % 2 == 0
                    && self.is_open(*position)
            })
            .collect()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::overhead()
    }
}
