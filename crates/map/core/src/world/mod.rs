//! Interfaces to the external room/exit graph.
//!
//! The engine never owns rooms. It reads them through [`RoomGraph`] and, when
//! building battlefields, creates and destroys subsections through
//! [`SectionStore`]. [`InMemoryWorld`] implements both.
mod memory;

pub use memory::InMemoryWorld;

use std::fmt;

use crate::grid::{Connector, GridPos};
use crate::symbol::GlyphSet;

/// Stable identity of a room in the world graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoomId(pub u64);

impl RoomId {
    /// Highest id a stored room should use. Ids above it are kept free so
    /// subsections created later always get a fresh id.
    pub const MAX_STORED: RoomId = RoomId(u64::MAX - u32::MAX as u64);
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Exit direction names understood by the engine.
///
/// Only the eight planar directions map onto the grid; `Up` and `Down` are
/// recognised so they can be skipped deliberately.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    #[strum(to_string = "north", serialize = "n")]
    North,
    #[strum(to_string = "south", serialize = "s")]
    South,
    #[strum(to_string = "east", serialize = "e")]
    East,
    #[strum(to_string = "west", serialize = "w")]
    West,
    #[strum(to_string = "northeast", serialize = "ne")]
    NorthEast,
    #[strum(to_string = "northwest", serialize = "nw")]
    NorthWest,
    #[strum(to_string = "southeast", serialize = "se")]
    SouthEast,
    #[strum(to_string = "southwest", serialize = "sw")]
    SouthWest,
    #[strum(to_string = "up", serialize = "u")]
    Up,
    #[strum(to_string = "down", serialize = "d")]
    Down,
}

impl Direction {
    /// Directions that have a grid vector.
    pub const PLANAR: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit `(d_row, d_col)` vector; rows grow southwards.
    pub const fn unit(self) -> Option<(i32, i32)> {
        match self {
            Direction::North => Some((-1, 0)),
            Direction::South => Some((1, 0)),
            Direction::East => Some((0, 1)),
            Direction::West => Some((0, -1)),
            Direction::NorthEast => Some((-1, 1)),
            Direction::NorthWest => Some((-1, -1)),
            Direction::SouthEast => Some((1, 1)),
            Direction::SouthWest => Some((1, -1)),
            Direction::Up | Direction::Down => None,
        }
    }

    /// Overhead-map step between two rooms.
    ///
    /// Magnitude 2 on every moving axis, so the odd cell in between is free
    /// for a connector.
    pub const fn step(self) -> Option<(i32, i32)> {
        match self.unit() {
            Some((d_row, d_col)) => Some((d_row * 2, d_col * 2)),
            None => None,
        }
    }

    pub const fn connector(self) -> Option<Connector> {
        match self {
            Direction::North | Direction::South => Some(Connector::Vertical),
            Direction::East | Direction::West => Some(Connector::Horizontal),
            Direction::NorthEast | Direction::SouthWest => Some(Connector::Rising),
            Direction::NorthWest | Direction::SouthEast => Some(Connector::Falling),
            Direction::Up | Direction::Down => None,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Short alias used when creating exits (`n`, `se`, ...).
    pub const fn alias(self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::South => "s",
            Direction::East => "e",
            Direction::West => "w",
            Direction::NorthEast => "ne",
            Direction::NorthWest => "nw",
            Direction::SouthEast => "se",
            Direction::SouthWest => "sw",
            Direction::Up => "u",
            Direction::Down => "d",
        }
    }
}

/// One-way named link from a room to a destination.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exit {
    pub name: String,
    pub destination: RoomId,
}

impl Exit {
    pub fn new(name: impl Into<String>, destination: RoomId) -> Self {
        Self {
            name: name.into(),
            destination,
        }
    }

    /// Parsed direction, or `None` for names the engine does not know.
    pub fn direction(&self) -> Option<Direction> {
        self.name.parse().ok()
    }
}

/// Combatants occupying a room, as far as glyph selection cares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatPresence {
    #[default]
    None,
    /// An enemy combatant stands here.
    Enemy,
    /// A bystander who is not part of the fight stands here.
    Observer,
}

/// Typed view of the room attributes glyph selection depends on.
///
/// Every optional field has a fallback: no glyph set means the sector table
/// is used, no sector type means the unknown glyph, no size means the small
/// battlefield preset.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomAttributes {
    pub id: RoomId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Metres above sea level outdoors, floor number indoors.
    #[cfg_attr(feature = "serde", serde(default))]
    pub elevation: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_outdoor"))]
    pub outdoor: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sector_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub glyph_set: Option<GlyphSet>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub presence: CombatPresence,
    /// Floor area in square metres.
    #[cfg_attr(feature = "serde", serde(default))]
    pub size: Option<u32>,
}

#[cfg(feature = "serde")]
fn default_outdoor() -> bool {
    true
}

impl RoomAttributes {
    /// Outdoor room at elevation 0 with no explicit glyphs.
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            name: String::new(),
            elevation: 0,
            outdoor: true,
            sector_type: None,
            glyph_set: None,
            presence: CombatPresence::None,
            size: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_elevation(mut self, elevation: i32) -> Self {
        self.elevation = elevation;
        self
    }

    #[must_use]
    pub fn indoors(mut self) -> Self {
        self.outdoor = false;
        self
    }

    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector_type = Some(sector.into());
        self
    }

    #[must_use]
    pub fn with_glyph_set(mut self, glyphs: GlyphSet) -> Self {
        self.glyph_set = Some(glyphs);
        self
    }

    #[must_use]
    pub fn with_presence(mut self, presence: CombatPresence) -> Self {
        self.presence = presence;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// Read access to the live room graph.
///
/// Implementations must return a consistent snapshot of a room's exits per
/// call; the walker does not guard against concurrent structural edits.
pub trait RoomGraph {
    fn attributes(&self, room: RoomId) -> Option<RoomAttributes>;

    /// Outgoing exits of `room`, empty for unknown rooms.
    fn exits(&self, room: RoomId) -> Vec<Exit>;

    fn contains(&self, room: RoomId) -> bool {
        self.attributes(room).is_some()
    }
}

/// Creation and destruction of battlefield subsections.
pub trait SectionStore {
    /// Creates a subsection of `parent` for the template cell at `position`.
    fn create_section(&mut self, parent: Option<RoomId>, position: GridPos) -> RoomId;

    /// Creates a one-way exit named after `direction`.
    fn create_exit(&mut self, from: RoomId, direction: Direction, to: RoomId);

    /// Destroys a subsection and every exit touching it.
    fn destroy_section(&mut self, section: RoomId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases_case_insensitively() {
        assert_eq!("north".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("NorthEast".parse::<Direction>(), Ok(Direction::NorthEast));
        assert_eq!("SW".parse::<Direction>(), Ok(Direction::SouthWest));
        assert!("portal".parse::<Direction>().is_err());
        assert_eq!(Direction::SouthEast.to_string(), "southeast");
    }

    #[test]
    fn vertical_directions_have_no_grid_vector() {
        assert_eq!(Direction::Up.step(), None);
        assert_eq!(Direction::Down.connector(), None);
        assert!(Direction::PLANAR.iter().all(|d| d.step().is_some()));
    }

    #[test]
    fn steps_have_magnitude_two_on_each_moving_axis() {
        assert_eq!(Direction::North.step(), Some((-2, 0)));
        assert_eq!(Direction::East.step(), Some((0, 2)));
        assert_eq!(Direction::NorthEast.step(), Some((-2, 2)));
        assert_eq!(Direction::SouthWest.step(), Some((2, -2)));
    }

    #[test]
    fn opposite_cancels_the_step() {
        for direction in Direction::PLANAR {
            let (a_row, a_col) = direction.step().unwrap();
            let (b_row, b_col) = direction.opposite().step().unwrap();
            assert_eq!((a_row + b_row, a_col + b_col), (0, 0), "{direction}");
            assert_eq!(direction.connector(), direction.opposite().connector());
        }
    }

    #[test]
    fn exit_direction_ignores_unknown_names() {
        assert_eq!(Exit::new("East", RoomId(2)).direction(), Some(Direction::East));
        assert_eq!(Exit::new("trapdoor", RoomId(2)).direction(), None);
    }
}
