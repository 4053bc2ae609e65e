//! In-memory room graph used by tools, loaders and tests.
use std::collections::BTreeMap;

use super::{Direction, Exit, RoomAttributes, RoomGraph, RoomId, SectionStore};
use crate::grid::GridPos;

/// Room graph held entirely in memory.
///
/// Exits keep their insertion order, which is the order the walker explores
/// them in.
#[derive(Clone, Debug, Default)]
pub struct InMemoryWorld {
    rooms: BTreeMap<RoomId, RoomAttributes>,
    exits: BTreeMap<RoomId, Vec<Exit>>,
    next_id: u64,
}

impl InMemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a room.
    ///
    /// New subsection ids continue after the highest id inserted so far;
    /// inserting [`RoomId`]`(u64::MAX)` leaves no fresh id for them.
    pub fn insert_room(&mut self, attributes: RoomAttributes) -> RoomId {
        let id = attributes.id;
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.rooms.insert(id, attributes);
        id
    }

    pub fn room_mut(&mut self, room: RoomId) -> Option<&mut RoomAttributes> {
        self.rooms.get_mut(&room)
    }

    /// Adds a one-way exit with an arbitrary name.
    pub fn add_exit(&mut self, from: RoomId, name: impl Into<String>, to: RoomId) {
        self.exits.entry(from).or_default().push(Exit::new(name, to));
    }

    /// Adds a one-way exit named after `direction`.
    pub fn connect(&mut self, from: RoomId, direction: Direction, to: RoomId) {
        self.add_exit(from, direction.to_string(), to);
    }

    /// Adds `a -> b` along `direction` and `b -> a` along its opposite.
    pub fn link(&mut self, a: RoomId, direction: Direction, b: RoomId) {
        self.connect(a, direction, b);
        self.connect(b, direction.opposite(), a);
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn exit_count(&self) -> usize {
        self.exits.values().map(Vec::len).sum()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &RoomAttributes> + '_ {
        self.rooms.values()
    }

    /// Removes a room, its exits and every exit leading into it.
    pub fn remove_room(&mut self, room: RoomId) -> Option<RoomAttributes> {
        let removed = self.rooms.remove(&room);
        self.exits.remove(&room);
        for exits in self.exits.values_mut() {
            exits.retain(|exit| exit.destination != room);
        }
        removed
    }
}

impl RoomGraph for InMemoryWorld {
    fn attributes(&self, room: RoomId) -> Option<RoomAttributes> {
        self.rooms.get(&room).cloned()
    }

    fn exits(&self, room: RoomId) -> Vec<Exit> {
        self.exits.get(&room).cloned().unwrap_or_default()
    }

    fn contains(&self, room: RoomId) -> bool {
        self.rooms.contains_key(&room)
    }
}

impl SectionStore for InMemoryWorld {
    fn create_section(&mut self, parent: Option<RoomId>, position: GridPos) -> RoomId {
        let id = RoomId(self.next_id);
        let mut section = RoomAttributes::new(id);

        match parent.and_then(|parent| self.rooms.get(&parent)) {
            Some(parent) => {
                section.name = format!("section of {} at {}, {}", parent.name, position.col, position.row);
                section.elevation = parent.elevation;
                section.outdoor = parent.outdoor;
                section.sector_type = parent.sector_type.clone();
            }
            None => {
                section.name = format!("section at {}, {}", position.col, position.row);
            }
        }

        self.insert_room(section)
    }

    fn create_exit(&mut self, from: RoomId, direction: Direction, to: RoomId) {
        self.connect(from, direction, to);
    }

    fn destroy_section(&mut self, section: RoomId) {
        self.remove_room(section);
    }
}
