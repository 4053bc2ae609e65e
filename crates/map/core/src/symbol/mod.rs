//! Glyph selection for rooms.
//!
//! [`SymbolResolver::resolve`] applies, in order:
//!
//! 1. the observer's own room gets the indoor or outdoor *self* glyph,
//! 2. a room holding an enemy combatant or a non-combatant observer gets the
//!    matching presence glyph,
//! 3. a room with an explicit [`GlyphSet`] gets the entry for its
//!    [`ElevationBand`] relative to the observer,
//! 4. anything else is looked up by sector type, falling back to the
//!    *unknown* glyph.
mod elevation;

pub use elevation::ElevationBand;

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ErrorSeverity, MapError};
use crate::world::{CombatPresence, RoomAttributes, RoomId};

/// Display text for one grid cell.
///
/// Usually a single character, but may carry client colour markup
/// (e.g. `|500@|n`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Glyph(String);

impl Glyph {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Glyph {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Glyph {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<char> for Glyph {
    fn from(value: char) -> Self {
        Self(value.to_string())
    }
}

impl Borrow<str> for Glyph {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GlyphSetError {
    #[error("glyph set must hold 1 or {count} glyphs, got {0}", count = ElevationBand::COUNT)]
    InvalidLength(usize),
}

impl MapError for GlyphSetError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            GlyphSetError::InvalidLength(_) => "GLYPH_SET_INVALID_LENGTH",
        }
    }
}

/// Explicit glyphs defined by a room.
///
/// A single glyph is used regardless of elevation; five glyphs are indexed by
/// [`ElevationBand`] from lowest to highest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Glyph>", into = "Vec<Glyph>")
)]
pub enum GlyphSet {
    Single(Glyph),
    Banded([Glyph; ElevationBand::COUNT]),
}

impl GlyphSet {
    pub fn select(&self, band: ElevationBand) -> &Glyph {
        match self {
            GlyphSet::Single(glyph) => glyph,
            GlyphSet::Banded(glyphs) => &glyphs[band.index()],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            GlyphSet::Single(_) => 1,
            GlyphSet::Banded(glyphs) => glyphs.len(),
        }
    }
}

impl TryFrom<Vec<Glyph>> for GlyphSet {
    type Error = GlyphSetError;

    fn try_from(mut glyphs: Vec<Glyph>) -> Result<Self, Self::Error> {
        match glyphs.len() {
            1 => Ok(GlyphSet::Single(glyphs.remove(0))),
            ElevationBand::COUNT => glyphs
                .try_into()
                .map(GlyphSet::Banded)
                .map_err(|rest: Vec<Glyph>| GlyphSetError::InvalidLength(rest.len())),
            len => Err(GlyphSetError::InvalidLength(len)),
        }
    }
}

impl From<GlyphSet> for Vec<Glyph> {
    fn from(value: GlyphSet) -> Self {
        match value {
            GlyphSet::Single(glyph) => vec![glyph],
            GlyphSet::Banded(glyphs) => glyphs.into(),
        }
    }
}

/// Glyph lookup table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SymbolTable {
    /// Observer's room when indoors.
    pub self_indoor: Glyph,
    /// Observer's room when outdoors.
    pub self_outdoor: Glyph,
    /// Room or connection of unknown type.
    ///
    /// A bare `.` rather than a padded ` . `: every glyph fills one cell and
    /// the renderer adds the spacing between cells.
    pub unknown: Glyph,
    /// Room holding an enemy combatant.
    pub enemy: Glyph,
    /// Room holding a non-combatant observer.
    pub observer: Glyph,
    /// Glyphs keyed by sector type.
    pub sectors: BTreeMap<String, Glyph>,
}

impl SymbolTable {
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>, glyph: impl Into<Glyph>) -> Self {
        self.sectors.insert(sector.into(), glyph.into());
        self
    }

    /// Glyph for `sector`, or [`SymbolTable::unknown`] if unregistered.
    pub fn sector(&self, sector: Option<&str>) -> &Glyph {
        sector
            .and_then(|key| self.sectors.get(key))
            .unwrap_or(&self.unknown)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            self_indoor: Glyph::from("|505@|n"),
            self_outdoor: Glyph::from("|500@|n"),
            unknown: Glyph::from("."),
            enemy: Glyph::from("◙"),
            observer: Glyph::from("○"),
            sectors: BTreeMap::new(),
        }
        .with_sector("CROSSROADS", "╬")
        .with_sector("SECT_INSIDE", ".")
    }
}

/// The viewer a map is resolved for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observer {
    pub room: RoomId,
    pub elevation: i32,
}

impl Observer {
    pub const fn new(room: RoomId, elevation: i32) -> Self {
        Self { room, elevation }
    }

    /// Observer standing in the room described by `attributes`.
    pub fn in_room(attributes: &RoomAttributes) -> Self {
        Self::new(attributes.id, attributes.elevation)
    }
}

/// Chooses the display glyph for a room relative to an observer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolResolver {
    table: SymbolTable,
}

impl SymbolResolver {
    pub fn new(table: SymbolTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn resolve(&self, observer: &Observer, room: &RoomAttributes) -> Glyph {
        if let Some(marker) = self.marker(observer, room) {
            return marker;
        }

        if let Some(glyphs) = &room.glyph_set {
            let delta = room.elevation.saturating_sub(observer.elevation);
            let band = ElevationBand::from_delta(delta);
            return glyphs.select(band).clone();
        }

        self.table.sector(room.sector_type.as_deref()).clone()
    }

    /// Glyph for rooms whose occupants decide what is shown: the observer's
    /// own room and rooms with a combat presence. `None` for everything else.
    pub fn marker(&self, observer: &Observer, room: &RoomAttributes) -> Option<Glyph> {
        if room.id == observer.room {
            let glyph = if room.outdoor {
                &self.table.self_outdoor
            } else {
                &self.table.self_indoor
            };
            return Some(glyph.clone());
        }

        match room.presence {
            CombatPresence::None => None,
            CombatPresence::Enemy => Some(self.table.enemy.clone()),
            CombatPresence::Observer => Some(self.table.observer.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banded() -> GlyphSet {
        GlyphSet::try_from(
            ["0", "1", "2", "3", "4"]
                .into_iter()
                .map(Glyph::from)
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    fn room(id: u64) -> RoomAttributes {
        RoomAttributes::new(RoomId(id))
    }

    #[test]
    fn self_glyph_ignores_glyph_set_and_elevation() {
        let resolver = SymbolResolver::default();
        let observer = Observer::new(RoomId(1), 0);

        let outdoor = room(1).with_elevation(900).with_glyph_set(banded());
        let indoor = outdoor.clone().indoors();

        assert_eq!(resolver.resolve(&observer, &outdoor).as_str(), "|500@|n");
        assert_eq!(resolver.resolve(&observer, &indoor).as_str(), "|505@|n");
    }

    #[test]
    fn extreme_elevations_saturate_into_the_outer_bands() {
        let resolver = SymbolResolver::default();
        let low = Observer::new(RoomId(1), i32::MIN);
        let high = Observer::new(RoomId(1), i32::MAX);

        let peak = room(2).with_elevation(i32::MAX).with_glyph_set(banded());
        let pit = room(3).with_elevation(i32::MIN).with_glyph_set(banded());

        assert_eq!(resolver.resolve(&low, &peak).as_str(), "4");
        assert_eq!(resolver.resolve(&high, &pit).as_str(), "0");
        assert_eq!(resolver.resolve(&high, &peak).as_str(), "2");
    }

    #[test]
    fn invalid_glyph_set_length_is_reported() {
        let err = GlyphSet::try_from(vec![Glyph::from("a"), Glyph::from("b")]).unwrap_err();

        assert_eq!(err, GlyphSetError::InvalidLength(2));
        assert_eq!(err.to_string(), "glyph set must hold 1 or 5 glyphs, got 2");
    }

    #[test]
    fn banded_glyphs_follow_elevation_difference() {
        let resolver = SymbolResolver::default();
        let observer = Observer::new(RoomId(1), 100);

        let cases = [(-100, "0"), (0, "1"), (75, "2"), (125, "2"), (200, "3"), (226, "4")];
        for (elevation, expected) in cases {
            let target = room(2).with_elevation(elevation).with_glyph_set(banded());
            assert_eq!(resolver.resolve(&observer, &target).as_str(), expected, "{elevation}");
        }
    }

    #[test]
    fn single_glyph_is_used_unconditionally() {
        let resolver = SymbolResolver::default();
        let observer = Observer::new(RoomId(1), 0);
        let target = room(2)
            .with_elevation(-5000)
            .with_glyph_set(GlyphSet::Single(Glyph::from("¡")));

        assert_eq!(resolver.resolve(&observer, &target).as_str(), "¡");
    }

    #[test]
    fn sector_fallback_and_unknown() {
        let resolver = SymbolResolver::default();
        let observer = Observer::new(RoomId(1), 0);

        let crossroads = room(2).with_sector("CROSSROADS");
        let swamp = room(3).with_sector("SECT_SWAMP");
        let bare = room(4);

        assert_eq!(resolver.resolve(&observer, &crossroads).as_str(), "╬");
        assert_eq!(resolver.resolve(&observer, &swamp).as_str(), ".");
        assert_eq!(resolver.resolve(&observer, &bare).as_str(), ".");
    }

    #[test]
    fn presence_glyphs_take_priority_over_terrain() {
        let resolver = SymbolResolver::default();
        let observer = Observer::new(RoomId(1), 0);

        let enemy = room(2)
            .with_glyph_set(banded())
            .with_presence(CombatPresence::Enemy);
        let watcher = room(3)
            .with_sector("CROSSROADS")
            .with_presence(CombatPresence::Observer);

        assert_eq!(resolver.resolve(&observer, &enemy).as_str(), "◙");
        assert_eq!(resolver.resolve(&observer, &watcher).as_str(), "○");
        assert_eq!(resolver.marker(&observer, &room(4)), None);
    }

    #[test]
    fn glyph_set_requires_one_or_five_entries() {
        let three = vec![Glyph::from("a"), Glyph::from("b"), Glyph::from("c")];
        assert_eq!(GlyphSet::try_from(three), Err(GlyphSetError::InvalidLength(3)));
        assert_eq!(GlyphSet::try_from(Vec::new()), Err(GlyphSetError::InvalidLength(0)));
        assert_eq!(banded().len(), 5);
    }
}
