use std::collections::BTreeMap;

use tracing::debug;

use crate::grid::GridPos;
use crate::world::{Direction, RoomId, SectionStore};

/// A subsection created for one template cell, with the exits created from it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    pub room: RoomId,
    pub exits: BTreeMap<Direction, RoomId>,
}

impl Section {
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            exits: BTreeMap::new(),
        }
    }

    pub fn exit(&self, direction: Direction) -> Option<RoomId> {
        self.exits.get(&direction).copied()
    }
}

/// Template coordinate to subsection mapping for one battlefield.
///
/// The map is also the record of which exits exist, so every linking path
/// consults it before asking the [`SectionStore`] for a new exit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattlefieldSectionMap {
    sections: BTreeMap<GridPos, Section>,
}

impl BattlefieldSectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `room` at `position`; returns `false` if the cell was taken.
    pub fn insert(&mut self, position: GridPos, room: RoomId) -> bool {
        if self.sections.contains_key(&position) {
            return false;
        }
        self.sections.insert(position, Section::new(room));
        true
    }

    pub fn get(&self, position: GridPos) -> Option<&Section> {
        self.sections.get(&position)
    }

    pub fn room_at(&self, position: GridPos) -> Option<RoomId> {
        self.get(position).map(|section| section.room)
    }

    pub fn contains(&self, position: GridPos) -> bool {
        self.sections.contains_key(&position)
    }

    pub fn position_of(&self, room: RoomId) -> Option<GridPos> {
        self.sections
            .iter()
            .find_map(|(position, section)| (section.room == room).then_some(*position))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &Section)> + '_ {
        self.sections.iter().map(|(position, section)| (*position, section))
    }

    pub fn rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.sections.values().map(|section| section.room)
    }

    /// Total one-way exits created between subsections.
    pub fn exit_count(&self) -> usize {
        self.sections.values().map(|section| section.exits.len()).sum()
    }

    /// Whether `a` and `b` have exits leading to each other.
    pub fn is_linked(&self, a: GridPos, b: GridPos) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(from), Some(to)) => {
                from.exits.values().any(|room| *room == to.room)
                    && to.exits.values().any(|room| *room == from.room)
            }
            _ => false,
        }
    }

    /// Creates a one-way exit from the section at `from` to the one at `to`.
    ///
    /// Returns `false` without touching the store when either cell is empty
    /// or `from` already has an exit in `direction`.
    pub fn connect(
        &mut self,
        from: GridPos,
        direction: Direction,
        to: GridPos,
        store: &mut dyn SectionStore,
    ) -> bool {
        let Some(destination) = self.room_at(to) else {
            return false;
        };
        let Some(section) = self.sections.get_mut(&from) else {
            return false;
        };
        if let Some(existing) = section.exit(direction) {
            if existing != destination {
                debug!(%from, %direction, %existing, "exit direction already used");
            }
            return false;
        }

        store.create_exit(section.room, direction, destination);
        section.exits.insert(direction, destination);
        true
    }

    /// Creates the exit pair `a -> b` along `direction` and `b -> a` back.
    ///
    /// Returns the number of exits actually created (0 to 2).
    pub fn link(
        &mut self,
        a: GridPos,
        direction: Direction,
        b: GridPos,
        store: &mut dyn SectionStore,
    ) -> usize {
        usize::from(self.connect(a, direction, b, store))
            + usize::from(self.connect(b, direction.opposite(), a, store))
    }

    /// Connects every pair of orthogonally neighbouring subsections.
    ///
    /// Subsections sit two cells apart with the connector cell between them,
    /// so neighbours are found by a [`Direction::step`] delta in each of
    /// N/E/S/W. Pairs already connected are left alone, so a second sweep
    /// creates nothing. Returns the number of exits created.
    pub fn auto_link(&mut self, store: &mut dyn SectionStore) -> usize {
        let positions: Vec<GridPos> = self.sections.keys().copied().collect();
        let mut created = 0;

        for position in positions {
            for direction in Direction::ORTHOGONAL {
                let Some(step) = direction.step() else {
                    continue;
                };
                let neighbour = position.offset(step);
                if self.contains(neighbour) && self.connect(position, direction, neighbour, store) {
                    created += 1;
                }
            }
        }

        created
    }
}
