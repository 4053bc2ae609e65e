//! Overhead map traversal ("the worm").
//!
//! Starting from the observer's room, placed at the centre of the frame, the
//! walker explores exits depth-first. Each planar exit moves two cells on the
//! grid; the cell in between receives a connector glyph. Exploration stops at
//! the configured radius, and a room that has already been placed is never
//! entered again, which absorbs cycles and shared rooms.
//!
//! The traversal keeps its own stack instead of recursing, so the worst-case
//! depth is bounded by the radius rather than by the call stack.
use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::error::{ErrorSeverity, MapError};
use crate::grid::{Cell, Frame, Grid, GridPos};
use crate::symbol::{Observer, SymbolResolver};
use crate::world::{Direction, Exit, RoomAttributes, RoomGraph, RoomId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalkError {
    #[error("observer room {0} is not part of the world graph")]
    UnknownObserver(RoomId),
}

impl MapError for WalkError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            WalkError::UnknownObserver(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            WalkError::UnknownObserver(_) => "WALK_UNKNOWN_OBSERVER",
        }
    }
}

/// Result of one overhead render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverheadMap {
    grid: Grid,
    origin: GridPos,
    visited: BTreeMap<RoomId, GridPos>,
    drawn: BTreeSet<RoomId>,
}

impl OverheadMap {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Cell the observer was placed on.
    pub fn origin(&self) -> GridPos {
        self.origin
    }

    /// Every room the traversal reached, with its computed grid position.
    ///
    /// Positions may lie outside the grid for rooms at the periphery.
    pub fn visited(&self) -> &BTreeMap<RoomId, GridPos> {
        &self.visited
    }

    pub fn position_of(&self, room: RoomId) -> Option<GridPos> {
        self.visited.get(&room).copied()
    }

    /// Rooms that actually received a glyph, observer included.
    pub fn nearby_rooms(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.drawn.iter().copied()
    }

    pub fn render(&self) -> String {
        self.grid.to_string()
    }
}

/// Pending exits of a room on the traversal stack.
struct Visit {
    position: GridPos,
    radius: u32,
    exits: std::vec::IntoIter<Exit>,
}

/// Mutable state owned by a single render.
struct Canvas<'f> {
    frame: &'f Frame,
    grid: Grid,
    visited: BTreeMap<RoomId, GridPos>,
    occupied: HashMap<GridPos, RoomId>,
    drawn: BTreeSet<RoomId>,
}

impl<'f> Canvas<'f> {
    fn new(frame: &'f Frame) -> Self {
        Self {
            frame,
            grid: frame.canvas(),
            visited: BTreeMap::new(),
            occupied: HashMap::new(),
            drawn: BTreeSet::new(),
        }
    }

    fn is_visited(&self, room: RoomId) -> bool {
        self.visited.contains_key(&room)
    }

    /// Records `room` at `position` and draws it if the cell allows it.
    fn place(&mut self, room: RoomId, position: GridPos, cell: Cell) {
        self.visited.insert(room, position);

        if let Some(other) = self.occupied.get(&position) {
            debug!(%room, %other, %position, "cell already holds a room, not overdrawing");
            return;
        }
        if self.grid.contains(position) && !self.frame.is_open(position) {
            trace!(%room, %position, "room falls on a closed frame cell");
            return;
        }
        match self.grid.set(position, cell) {
            Ok(()) => {
                self.occupied.insert(position, room);
                self.drawn.insert(room);
            }
            Err(err) => debug!(%room, error = %err, "skipping room outside the grid"),
        }
    }

    fn connect(&mut self, position: GridPos, direction: Direction) {
        let Some(connector) = direction.connector() else {
            return;
        };
        if self.grid.contains(position) && !self.frame.is_open(position) {
            return;
        }
        if let Err(err) = self.grid.set(position, Cell::Connector(connector)) {
            debug!(error = %err, %direction, "skipping connector outside the grid");
        }
    }
}

/// Bounded depth-first walker over a [`RoomGraph`].
#[derive(Clone, Debug, Default)]
pub struct RoomGraphWalker {
    resolver: SymbolResolver,
    frame: Frame,
}

impl RoomGraphWalker {
    pub fn new(resolver: SymbolResolver, frame: Frame) -> Self {
        Self { resolver, frame }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn resolver(&self) -> &SymbolResolver {
        &self.resolver
    }

    /// Maps every room reachable from `observer` within `max_radius` exits.
    ///
    /// A radius of 0 draws only the observer's room.
    pub fn walk<G>(&self, graph: &G, observer: RoomId, max_radius: u32) -> Result<OverheadMap, WalkError>
    where
        G: RoomGraph + ?Sized,
    {
        let root = graph
            .attributes(observer)
            .ok_or(WalkError::UnknownObserver(observer))?;
        let viewer = Observer::in_room(&root);

        let mut canvas = Canvas::new(&self.frame);
        let origin = canvas.grid.center();
        canvas.place(observer, origin, self.room_cell(&viewer, &root));

        let mut stack = Vec::new();
        if max_radius > 0 {
            stack.push(Visit {
                position: origin,
                radius: max_radius,
                exits: graph.exits(observer).into_iter(),
            });
        }

        while let Some(visit) = stack.last_mut() {
            let Some(exit) = visit.exits.next() else {
                stack.pop();
                continue;
            };
            let Some((direction, step)) = exit
                .direction()
                .and_then(|direction| direction.step().map(|step| (direction, step)))
            else {
                trace!(exit = %exit.name, "exit has no grid direction");
                continue;
            };
            if canvas.is_visited(exit.destination) {
                continue;
            }
            let Some(room) = graph.attributes(exit.destination) else {
                debug!(destination = %exit.destination, "exit leads to an unknown room");
                continue;
            };

            let from = visit.position;
            let radius = visit.radius - 1;
            let target = from.offset(step);

            canvas.connect(from.midpoint(target), direction);
            canvas.place(room.id, target, self.room_cell(&viewer, &room));
            trace!(room = %room.id, position = %target, radius, "worm placed room");

            if radius > 0 {
                stack.push(Visit {
                    position: target,
                    radius,
                    exits: graph.exits(room.id).into_iter(),
                });
            }
        }

        debug!(
            observer = %observer,
            visited = canvas.visited.len(),
            drawn = canvas.drawn.len(),
            "overhead map rendered"
        );

        Ok(OverheadMap {
            grid: canvas.grid,
            origin,
            visited: canvas.visited,
            drawn: canvas.drawn,
        })
    }

    fn room_cell(&self, observer: &Observer, room: &RoomAttributes) -> Cell {
        Cell::Room(self.resolver.resolve(observer, room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Connector;
    use crate::symbol::{Glyph, SymbolTable};
    use crate::world::InMemoryWorld;

    fn plain_resolver() -> SymbolResolver {
        SymbolResolver::new(SymbolTable {
            self_outdoor: Glyph::from("@"),
            self_indoor: Glyph::from("@"),
            unknown: Glyph::from("o"),
            ..SymbolTable::default()
        })
    }

    fn walker(width: usize, height: usize) -> RoomGraphWalker {
        RoomGraphWalker::new(plain_resolver(), Frame::blank(width, height))
    }

    fn world_with(ids: &[u64]) -> InMemoryWorld {
        let mut world = InMemoryWorld::new();
        for id in ids {
            world.insert_room(RoomAttributes::new(RoomId(*id)));
        }
        world
    }

    fn cell(map: &OverheadMap, row: i32, col: i32) -> Option<&Cell> {
        map.grid().get(GridPos::new(row, col))
    }

    #[test]
    fn unknown_observer_is_an_error() {
        let world = world_with(&[]);
        let err = walker(5, 5).walk(&world, RoomId(1), 2).unwrap_err();
        assert_eq!(err, WalkError::UnknownObserver(RoomId(1)));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn radius_zero_draws_only_the_observer() {
        let mut world = world_with(&[1, 2]);
        world.link(RoomId(1), Direction::East, RoomId(2));

        let map = walker(5, 5).walk(&world, RoomId(1), 0).unwrap();

        assert_eq!(map.visited().len(), 1);
        assert_eq!(cell(&map, 2, 2), Some(&Cell::Room(Glyph::from("@"))));
        assert_eq!(cell(&map, 2, 3), Some(&Cell::Empty));
    }

    #[test]
    fn places_neighbours_two_cells_away_with_connectors() {
        let mut world = world_with(&[1, 2, 3, 4]);
        world.link(RoomId(1), Direction::East, RoomId(2));
        world.link(RoomId(1), Direction::North, RoomId(3));
        world.link(RoomId(1), Direction::SouthWest, RoomId(4));

        let map = walker(7, 7).walk(&world, RoomId(1), 1).unwrap();

        assert_eq!(map.position_of(RoomId(2)), Some(GridPos::new(3, 5)));
        assert_eq!(map.position_of(RoomId(3)), Some(GridPos::new(1, 3)));
        assert_eq!(map.position_of(RoomId(4)), Some(GridPos::new(5, 1)));
        assert_eq!(cell(&map, 3, 4), Some(&Cell::Connector(Connector::Horizontal)));
        assert_eq!(cell(&map, 2, 3), Some(&Cell::Connector(Connector::Vertical)));
        assert_eq!(cell(&map, 4, 2), Some(&Cell::Connector(Connector::Rising)));
        assert_eq!(cell(&map, 3, 5), Some(&Cell::Room(Glyph::from("o"))));
    }

    #[test]
    fn radius_bounds_the_walk() {
        let mut world = world_with(&[1, 2, 3, 4]);
        world.link(RoomId(1), Direction::East, RoomId(2));
        world.link(RoomId(2), Direction::East, RoomId(3));
        world.link(RoomId(3), Direction::East, RoomId(4));

        let map = walker(11, 3).walk(&world, RoomId(1), 2).unwrap();

        assert!(map.position_of(RoomId(3)).is_some());
        assert!(map.position_of(RoomId(4)).is_none());
    }

    #[test]
    fn cycles_terminate_and_place_each_room_once() {
        // 1 - 2
        // |   |
        // 3 - 4
        let mut world = world_with(&[1, 2, 3, 4]);
        world.link(RoomId(1), Direction::East, RoomId(2));
        world.link(RoomId(1), Direction::South, RoomId(3));
        world.link(RoomId(2), Direction::South, RoomId(4));
        world.link(RoomId(3), Direction::East, RoomId(4));

        let map = walker(9, 9).walk(&world, RoomId(1), 10).unwrap();

        assert_eq!(map.visited().len(), 4);
        let rooms = map.grid().cells().filter(|(_, cell)| cell.is_room()).count();
        assert_eq!(rooms, 4);
        assert_eq!(map.position_of(RoomId(4)), Some(GridPos::new(6, 6)));
    }

    #[test]
    fn self_loops_and_vertical_exits_are_ignored() {
        let mut world = world_with(&[1, 2, 3]);
        world.connect(RoomId(1), Direction::East, RoomId(1));
        world.connect(RoomId(1), Direction::Up, RoomId(2));
        world.add_exit(RoomId(1), "portal", RoomId(3));

        let map = walker(5, 5).walk(&world, RoomId(1), 3).unwrap();

        assert_eq!(map.visited().len(), 1);
        assert_eq!(cell(&map, 2, 3), Some(&Cell::Empty));
    }

    #[test]
    fn rooms_past_the_edge_are_visited_but_not_drawn() {
        let mut world = world_with(&[1, 2, 3]);
        world.link(RoomId(1), Direction::East, RoomId(2));
        world.link(RoomId(2), Direction::East, RoomId(3));

        let map = walker(3, 3).walk(&world, RoomId(1), 5).unwrap();

        assert_eq!(map.position_of(RoomId(3)), Some(GridPos::new(1, 5)));
        assert_eq!(map.nearby_rooms().collect::<Vec<_>>(), vec![RoomId(1)]);
        assert_eq!(map.grid().width(), 3);
    }

    #[test]
    fn overlapping_rooms_keep_the_first_placement() {
        // 4 is reached through 3 and lands on the cell already holding 2.
        let mut world = world_with(&[1, 2, 3, 4]);
        world.connect(RoomId(1), Direction::East, RoomId(2));
        world.connect(RoomId(1), Direction::North, RoomId(3));
        world.connect(RoomId(3), Direction::SouthEast, RoomId(4));

        let map = walker(9, 9).walk(&world, RoomId(1), 3).unwrap();

        assert_eq!(map.position_of(RoomId(4)), map.position_of(RoomId(2)));
        assert!(map.nearby_rooms().any(|room| room == RoomId(2)));
        assert!(!map.nearby_rooms().any(|room| room == RoomId(4)));
        assert_eq!(map.visited().len(), 4);
    }

    #[test]
    fn closed_frame_cells_hide_rooms() {
        let mut world = world_with(&[1, 2]);
        world.link(RoomId(1), Direction::North, RoomId(2));
        let frame = Frame::parse("█·█\n█·█\n█·█\n███\n███", Frame::WALL).unwrap();
        let walker = RoomGraphWalker::new(plain_resolver(), frame);

        let map = walker.walk(&world, RoomId(1), 1).unwrap();

        // centre of a 3x5 frame is (2, 1); north neighbour lands on (0, 1)
        assert_eq!(map.origin(), GridPos::new(2, 1));
        assert_eq!(cell(&map, 0, 1), Some(&Cell::Room(Glyph::from("o"))));

        let mut world = world_with(&[1, 2]);
        world.link(RoomId(1), Direction::South, RoomId(2));
        let map = walker.walk(&world, RoomId(1), 1).unwrap();
        assert_eq!(cell(&map, 4, 1), Some(&Cell::Background(Glyph::from('█'))));
        assert!(map.position_of(RoomId(2)).is_some());
    }
}
